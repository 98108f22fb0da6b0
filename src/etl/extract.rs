use crate::domain::{RawCase, CASE_TYPES, OUTCOMES, PRACTICE_AREAS, STATUSES};
use crate::error::Result;
use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;
use tracing::info;

/// Number of records a sourceless pipeline run generates.
pub const SAMPLE_SIZE: usize = 100;

const DATE_FMT: &str = "%Y-%m-%d";

/// Read raw cases from a CSV file with headers. Any malformed row is an
/// error; there is no partial extraction.
pub fn from_csv(path: &Path) -> Result<Vec<RawCase>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut cases = Vec::new();
    for row in reader.deserialize() {
        let case: RawCase = row?;
        cases.push(case);
    }
    info!(count = cases.len(), path = %path.display(), "Extracted cases from CSV");
    Ok(cases)
}

/// Generate `count` synthetic cases. Randomness is unseeded, so two runs
/// produce different data; only shape and value ranges are stable.
pub fn generate_sample(count: usize) -> Vec<RawCase> {
    let mut rng = rand::thread_rng();
    let window_start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    let mut cases = Vec::with_capacity(count);
    for i in 0..count {
        let filing_date = window_start + Duration::days(rng.gen_range(0..=365));
        let resolution_date = filing_date + Duration::days(rng.gen_range(30..=180));

        cases.push(RawCase {
            case_number: format!("CASE-2023-{:04}", i + 1),
            case_type: pick(&mut rng, &CASE_TYPES),
            filing_date: filing_date.format(DATE_FMT).to_string(),
            resolution_date: resolution_date.format(DATE_FMT).to_string(),
            status: pick(&mut rng, &STATUSES),
            practice_area: pick(&mut rng, &PRACTICE_AREAS),
            attorney_id: rng.gen_range(1..=10),
            settlement_amount: round2(rng.gen_range(5_000.0..=100_000.0)),
            outcome: pick(&mut rng, &OUTCOMES),
        });
    }
    info!(count = cases.len(), "Generated synthetic cases");
    cases
}

fn pick<R: Rng>(rng: &mut R, values: &[&str]) -> String {
    values.choose(rng).map(|v| v.to_string()).unwrap_or_default()
}

fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
