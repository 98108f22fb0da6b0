use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Date parsing failed: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
