pub mod extract;
pub mod transform;

use crate::domain::CaseRecord;
use crate::error::Result;
use crate::storage::CaseStore;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// The extract → transform → load pipeline. Constructed explicitly with the
/// storage location; there is no module-level default instance.
pub struct CaseEtl {
    db_path: PathBuf,
}

impl CaseEtl {
    /// Open the store and create the schema if it is missing. Schema setup
    /// happens here, once, not per run.
    pub fn new<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();
        let store = CaseStore::open(&db_path)?;
        store.init_schema()?;
        info!(db = %db_path.display(), "Database initialized");
        Ok(Self { db_path })
    }

    /// Run the full pipeline: extract from `source` (or generate synthetic
    /// data), transform every record, and replace the table contents.
    /// Returns the transformed set. Any stage error aborts the whole run;
    /// the load transaction leaves prior contents intact on failure.
    #[instrument(skip(self), fields(db = %self.db_path.display()))]
    pub fn run_pipeline(&self, source: Option<&Path>) -> Result<Vec<CaseRecord>> {
        info!("Starting ETL pipeline");

        let raw = match source {
            Some(path) => extract::from_csv(path)?,
            None => extract::generate_sample(extract::SAMPLE_SIZE),
        };

        let records = transform::transform_all(&raw)?;

        let mut store = CaseStore::open(&self.db_path)?;
        let loaded = store.replace_all(&records)?;
        info!(loaded, "ETL pipeline completed");

        Ok(records)
    }
}
