//! Survey orchestration.
//!
//! This module contains the concurrency scheduler and the `run_survey` entry
//! point used by the binary.

mod scheduler;
mod task;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::config::Config;
use crate::dns::{Exchange, QueryExecutor};
use crate::domain::DomainSource;
use crate::initialization::{init_client, init_resolver_pool};
use crate::statistics::StatsSnapshot;

pub use scheduler::Survey;

/// Results of a completed survey.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyReport {
    /// Final counter values
    pub stats: StatsSnapshot,
    /// Wall time from survey start to the last task joining
    pub elapsed_seconds: f64,
    /// Dispatched domains per second
    pub domains_per_second: f64,
}

impl SurveyReport {
    pub(crate) fn new(stats: StatsSnapshot, elapsed: Duration) -> Self {
        Self {
            stats,
            elapsed_seconds: elapsed.as_secs_f64(),
            domains_per_second: stats.rate(elapsed),
        }
    }
}

/// Runs a DMARC survey with the provided configuration.
///
/// Reads domains from `config.file` (or stdin for `-`), queries
/// `_dmarc.<domain>` TXT records over UDP and returns the aggregate counts.
///
/// # Errors
///
/// This function will return an error if:
/// - The configuration is invalid
/// - A resolver endpoint does not parse
/// - The input file cannot be opened
///
/// Individual resolution failures are never errors; they only leave a gap
/// between the domain count and the DMARC count.
///
/// # Example
///
/// ```no_run
/// use dmarc_survey::{run_survey, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config {
///     file: PathBuf::from("domains.txt"),
///     ..Default::default()
/// };
/// let report = run_survey(config).await?;
/// println!("{} of {} domains publish DMARC", report.stats.has_dmarc, report.stats.domains);
/// # Ok(())
/// # }
/// ```
pub async fn run_survey(config: Config) -> Result<SurveyReport> {
    let client = init_client(&config);
    run_survey_with(config, client).await
}

/// Runs a survey over an explicit transport.
///
/// Same as [`run_survey`] but queries go through `client`, which lets callers
/// substitute their own `Exchange` implementation.
pub async fn run_survey_with(config: Config, client: Arc<dyn Exchange>) -> Result<SurveyReport> {
    config.validate().context("Invalid configuration")?;
    let pool = init_resolver_pool(&config).context("Failed to initialize resolver pool")?;
    let mut source = DomainSource::open(&config.file)
        .await
        .context("Failed to open domain input")?;

    info!(
        "Surveying DMARC records via {} resolver(s), up to {} queries in flight, {}s timeout",
        pool.len(),
        config.max_concurrency,
        config.timeout_seconds
    );

    let executor = QueryExecutor::new(client, config.edns_payload_size);
    let mut survey = Survey::new(pool, executor, config.max_concurrency)
        .with_progress_interval(config.progress_interval);

    while let Some(domain) = source.next_domain().await {
        survey.dispatch(domain).await;
    }

    Ok(survey.finish().await)
}

#[cfg(test)]
mod tests;
