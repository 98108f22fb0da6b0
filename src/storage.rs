use crate::domain::CaseRecord;
use crate::error::Result;
use rusqlite::{params_from_iter, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DATE_FMT: &str = "%Y-%m-%d";

/// Optional filters shared by every aggregate endpoint. Field names mirror
/// the query-string parameters. Each field is independently nullable and
/// empty strings are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseFilter {
    pub case_type: Option<String>,
    pub practice_area: Option<String>,
    pub status: Option<String>,
    pub search_term: Option<String>,
}

impl CaseFilter {
    /// Build the WHERE clause for this filter. Returns SQL text containing
    /// only `?` placeholders and the values to bind, in order. Values are
    /// always bound, never interpolated into the SQL text. Provided filters
    /// combine with AND; absent ones are omitted entirely.
    pub fn where_clause(&self) -> (String, Vec<String>) {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(case_type) = non_empty(&self.case_type) {
            clauses.push("case_type = ?");
            values.push(case_type.to_string());
        }
        if let Some(practice_area) = non_empty(&self.practice_area) {
            clauses.push("practice_area = ?");
            values.push(practice_area.to_string());
        }
        if let Some(status) = non_empty(&self.status) {
            clauses.push("status = ?");
            values.push(status.to_string());
        }
        if let Some(term) = non_empty(&self.search_term) {
            clauses.push("(case_number LIKE ? OR case_type LIKE ? OR practice_area LIKE ?)");
            let pattern = format!("%{term}%");
            values.push(pattern.clone());
            values.push(pattern.clone());
            values.push(pattern);
        }

        if clauses.is_empty() {
            (String::new(), values)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), values)
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Aggregate statistics over the filtered case set. Averages are null when
/// the filter matches no rows.
#[derive(Debug, Serialize)]
pub struct CaseStats {
    pub total_cases: i64,
    pub active_cases: i64,
    pub avg_resolution_days: Option<f64>,
    pub success_rate: Option<f64>,
}

/// Per-case-type breakdown, ordered by count descending.
#[derive(Debug, Serialize)]
pub struct TypeBreakdown {
    pub case_type: String,
    pub count: i64,
    pub success_rate: f64,
    pub avg_settlement: f64,
}

/// Resolution-time summary per practice area.
#[derive(Debug, Serialize)]
pub struct ResolutionTimes {
    pub practice_area: String,
    pub avg_days: f64,
    pub min_days: i64,
    pub max_days: i64,
}

/// SQLite-backed store for the `cases` table. Callers open one store per
/// pipeline run or HTTP request; there is no pooling or shared state.
pub struct CaseStore {
    conn: Connection,
}

impl CaseStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the schema if it does not exist. Called once at startup, not
    /// per request.
    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cases (
                id                INTEGER PRIMARY KEY,
                case_number       TEXT NOT NULL,
                case_type         TEXT NOT NULL,
                practice_area     TEXT NOT NULL,
                filing_date       TEXT NOT NULL,
                resolution_date   TEXT NOT NULL,
                status            TEXT NOT NULL,
                attorney_id       INTEGER NOT NULL,
                settlement_amount REAL NOT NULL,
                outcome           TEXT NOT NULL,
                case_duration     INTEGER NOT NULL,
                settlement_tier   TEXT NOT NULL,
                is_successful     INTEGER NOT NULL,
                is_long_duration  INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Replace the entire table contents with `records` in one transaction.
    /// Full overwrite: a failed run leaves the previous contents untouched.
    pub fn replace_all(&mut self, records: &[CaseRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM cases", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO cases (
                    case_number, case_type, practice_area, filing_date,
                    resolution_date, status, attorney_id, settlement_amount,
                    outcome, case_duration, settlement_tier, is_successful,
                    is_long_duration
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )?;
            for record in records {
                stmt.execute(rusqlite::params![
                    record.case_number,
                    record.case_type,
                    record.practice_area,
                    record.filing_date.format(DATE_FMT).to_string(),
                    record.resolution_date.format(DATE_FMT).to_string(),
                    record.status,
                    record.attorney_id,
                    record.settlement_amount,
                    record.outcome,
                    record.case_duration,
                    record.settlement_tier.as_str(),
                    record.is_successful as i64,
                    record.is_long_duration as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    pub fn stats(&self, filter: &CaseFilter) -> Result<CaseStats> {
        let (where_sql, values) = filter.where_clause();
        let sql = format!(
            "SELECT
                COUNT(*) AS total_cases,
                COALESCE(SUM(CASE WHEN status = 'Active' THEN 1 ELSE 0 END), 0) AS active_cases,
                AVG(case_duration) AS avg_resolution_days,
                AVG(is_successful) AS success_rate
             FROM cases{where_sql}"
        );
        let stats = self.conn.query_row(&sql, params_from_iter(values), |row| {
            Ok(CaseStats {
                total_cases: row.get(0)?,
                active_cases: row.get(1)?,
                avg_resolution_days: row.get(2)?,
                success_rate: row.get(3)?,
            })
        })?;
        Ok(stats)
    }

    pub fn cases_by_type(&self, filter: &CaseFilter) -> Result<Vec<TypeBreakdown>> {
        let (where_sql, values) = filter.where_clause();
        let sql = format!(
            "SELECT
                case_type,
                COUNT(*) AS count,
                AVG(is_successful) AS success_rate,
                AVG(settlement_amount) AS avg_settlement
             FROM cases{where_sql}
             GROUP BY case_type
             ORDER BY count DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), |row| {
            Ok(TypeBreakdown {
                case_type: row.get(0)?,
                count: row.get(1)?,
                success_rate: row.get(2)?,
                avg_settlement: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn resolution_times(&self, filter: &CaseFilter) -> Result<Vec<ResolutionTimes>> {
        let (where_sql, values) = filter.where_clause();
        let sql = format!(
            "SELECT
                practice_area,
                AVG(case_duration) AS avg_days,
                MIN(case_duration) AS min_days,
                MAX(case_duration) AS max_days
             FROM cases{where_sql}
             GROUP BY practice_area
             ORDER BY practice_area"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), |row| {
            Ok(ResolutionTimes {
                practice_area: row.get(0)?,
                avg_days: row.get(1)?,
                min_days: row.get(2)?,
                max_days: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
