//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dmarc_survey` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use dmarc_survey::initialization::init_logger_with;
use dmarc_survey::{run_survey, Config, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format.clone())
        .context("Failed to initialize logger")?;

    match run_survey(config).await {
        Ok(report) => {
            // The FINAL progress line has already been logged
            if log_format == LogFormat::Json {
                println!(
                    "{}",
                    serde_json::to_string(&report).context("Failed to serialize report")?
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("dmarc_survey error: {:#}", e);
            process::exit(1);
        }
    }
}
