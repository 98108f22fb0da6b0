use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "legal_cases.db";
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration, read from the environment with sensible defaults.
/// CLI flags take precedence over these values; `.env` is loaded in main.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let db_path = env::var("CASELYTICS_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { db_path, port }
    }
}
