//! Aggregate DMARC counters.
//!
//! This module provides:
//! - `DmarcCounters`: process-wide atomic tallies updated by every task
//! - `StatsSnapshot`: a point-in-time copy with the derived percentages and rate

mod counters;
mod snapshot;

// Re-export public API
pub use counters::DmarcCounters;
pub use snapshot::StatsSnapshot;
