//! Progress logging utilities.

use std::time::{Duration, Instant};

use log::info;

use crate::statistics::{DmarcCounters, StatsSnapshot};

/// Formats one progress line.
///
/// Every figure is derived from the snapshot and `elapsed` alone, so the final
/// line can be reproduced from a saved report.
pub fn format_progress(snapshot: &StatsSnapshot, elapsed: Duration) -> String {
    format!(
        "{} domains, {} ({:.2}%) DMARC, {} ({:.2}%) DMARC valid, {} ({:.2}%) p=none, {} ({:.2}%) p=quarantine, {} ({:.2}%) p=reject, {:.2?}, {:.0} domains/s",
        snapshot.domains,
        snapshot.has_dmarc,
        snapshot.percent(snapshot.has_dmarc),
        snapshot.valid_dmarc,
        snapshot.percent(snapshot.valid_dmarc),
        snapshot.policy_none,
        snapshot.percent(snapshot.policy_none),
        snapshot.policy_quarantine,
        snapshot.percent(snapshot.policy_quarantine),
        snapshot.policy_reject,
        snapshot.percent(snapshot.policy_reject),
        elapsed,
        snapshot.rate(elapsed),
    )
}

/// Logs progress information about the survey.
///
/// # Arguments
///
/// * `start_time` - The start time of the survey
/// * `counters` - Shared survey counters
pub fn log_progress(start_time: Instant, counters: &DmarcCounters) {
    let snapshot = counters.snapshot();
    info!("{}", format_progress(&snapshot, start_time.elapsed()));
}

/// Logs the final summary line once all tasks have joined.
pub fn log_final(snapshot: &StatsSnapshot, elapsed: Duration) {
    info!("FINAL {}", format_progress(snapshot, elapsed));
}
