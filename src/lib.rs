//! dmarc_survey library: bulk DMARC policy classification over DNS
//!
//! This library queries the `_dmarc.<domain>` TXT record of every domain in a
//! list against a small pool of upstream resolvers and tallies how many
//! domains publish DMARC, how many records are valid, and how the published
//! policies split between `none`, `quarantine` and `reject`.
//!
//! # Example
//!
//! ```no_run
//! use dmarc_survey::{run_survey, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("domains.txt"),
//!     max_concurrency: 200,
//!     ..Default::default()
//! };
//!
//! let report = run_survey(config).await?;
//! println!("{} domains, {} with a valid DMARC record",
//!          report.stats.domains, report.stats.valid_dmarc);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod dmarc;
pub mod dns;
pub mod domain;
mod error_handling;
pub mod initialization;
mod run;
pub mod statistics;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use dmarc::{classify, DmarcFinding, PolicyAction};
pub use error_handling::{InitializationError, QueryError};
pub use run::{run_survey, run_survey_with, Survey, SurveyReport};
pub use statistics::{DmarcCounters, StatsSnapshot};
