use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category values used by the synthetic generator. Externally supplied
/// files may carry values outside these lists; they are stored as-is.
pub const CASE_TYPES: [&str; 5] = [
    "Personal Injury",
    "Family Law",
    "Criminal Defense",
    "Real Estate",
    "Corporate",
];
pub const PRACTICE_AREAS: [&str; 4] = [
    "Civil Litigation",
    "Criminal Law",
    "Family Law",
    "Corporate Law",
];
pub const STATUSES: [&str; 2] = ["Active", "Resolved"];
pub const OUTCOMES: [&str; 3] = ["Success", "Pending", "Settled"];

/// A case as extracted from a source file or the synthetic generator,
/// before any normalization. Dates are still `%Y-%m-%d` strings here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCase {
    pub case_number: String,
    pub case_type: String,
    pub filing_date: String,
    pub resolution_date: String,
    pub status: String,
    pub practice_area: String,
    pub attorney_id: i64,
    pub settlement_amount: f64,
    pub outcome: String,
}

/// Settlement amount bucketed into tiers. Boundary values belong to the
/// upper bin: 10_000 is Medium, 100_000 is VeryHigh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl SettlementTier {
    pub fn from_amount(amount: f64) -> Self {
        if amount < 10_000.0 {
            SettlementTier::Low
        } else if amount < 50_000.0 {
            SettlementTier::Medium
        } else if amount < 100_000.0 {
            SettlementTier::High
        } else {
            SettlementTier::VeryHigh
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementTier::Low => "Low",
            SettlementTier::Medium => "Medium",
            SettlementTier::High => "High",
            SettlementTier::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for SettlementTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully transformed case, ready for persistence. Every derived field is
/// consistent with its source fields.
#[derive(Debug, Clone, Serialize)]
pub struct CaseRecord {
    pub case_number: String,
    pub case_type: String,
    pub practice_area: String,
    pub filing_date: NaiveDate,
    pub resolution_date: NaiveDate,
    pub status: String,
    pub attorney_id: i64,
    pub settlement_amount: f64,
    pub outcome: String,
    pub case_duration: i64,
    pub settlement_tier: SettlementTier,
    pub is_successful: bool,
    pub is_long_duration: bool,
}
