use crate::domain::{CaseRecord, RawCase, SettlementTier};
use crate::error::{PipelineError, Result};
use chrono::NaiveDate;

const DATE_FMT: &str = "%Y-%m-%d";

/// Transform a batch of raw cases. Record-wise and order-preserving; the
/// first bad record aborts the batch.
pub fn transform_all(raw: &[RawCase]) -> Result<Vec<CaseRecord>> {
    raw.iter().map(transform).collect()
}

/// Transform one raw case into its persisted shape: title-case the
/// categorical fields, parse dates, and attach the derived fields.
pub fn transform(raw: &RawCase) -> Result<CaseRecord> {
    let filing_date = NaiveDate::parse_from_str(&raw.filing_date, DATE_FMT)?;
    let resolution_date = NaiveDate::parse_from_str(&raw.resolution_date, DATE_FMT)?;

    let case_duration = (resolution_date - filing_date).num_days();
    if case_duration < 0 {
        return Err(PipelineError::InvalidRecord(format!(
            "{}: resolution_date {} precedes filing_date {}",
            raw.case_number, raw.resolution_date, raw.filing_date
        )));
    }

    // Outcome is compared as stored, not title-cased.
    let is_successful = raw.outcome == "Success";

    Ok(CaseRecord {
        case_number: raw.case_number.clone(),
        case_type: title_case(&raw.case_type),
        practice_area: title_case(&raw.practice_area),
        filing_date,
        resolution_date,
        status: raw.status.clone(),
        attorney_id: raw.attorney_id,
        settlement_amount: raw.settlement_amount,
        outcome: raw.outcome.clone(),
        case_duration,
        settlement_tier: SettlementTier::from_amount(raw.settlement_amount),
        is_successful,
        is_long_duration: case_duration > 90,
    })
}

/// Word-wise title casing: first character upper, rest lower.
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
