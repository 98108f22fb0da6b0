use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use caselytics::config::Config;
use caselytics::etl::CaseEtl;
use caselytics::logging::init_logging;
use caselytics::server::{start_server, AppState};

#[derive(Parser)]
#[command(name = "caselytics")]
#[command(about = "Legal case ETL pipeline and aggregate statistics API")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the ETL pipeline once and exit
    Pipeline {
        /// CSV file to extract from; omit to generate synthetic cases
        #[arg(long)]
        source: Option<PathBuf>,
        /// SQLite database path (overrides CASELYTICS_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Serve the statistics API
    Serve {
        /// Port to bind (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// SQLite database path (overrides CASELYTICS_DB)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Serve existing data without running the pipeline first
        #[arg(long)]
        skip_pipeline: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    init_logging();

    let config = Config::from_env();

    match cli.command {
        Commands::Pipeline { source, db } => {
            let db_path = db.unwrap_or(config.db_path);
            let etl = CaseEtl::new(db_path)?;
            let records = etl.run_pipeline(source.as_deref())?;
            println!("✅ Pipeline completed - {} cases loaded", records.len());
        }
        Commands::Serve { port, db, skip_pipeline } => {
            let db_path = db.unwrap_or(config.db_path);
            let port = port.unwrap_or(config.port);

            let etl = CaseEtl::new(&db_path)?;
            if skip_pipeline {
                info!("Skipping initial pipeline run");
            } else {
                let records = etl.run_pipeline(None)?;
                info!(count = records.len(), "Initial pipeline run completed");
            }

            start_server(AppState::new(db_path), port).await?;
        }
    }

    Ok(())
}
