//! Point-in-time view of the counters.

use std::time::Duration;

use serde::Serialize;

use crate::dmarc::PolicyAction;

/// Counter values at one instant, with the numbers the progress line reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Domains dispatched
    pub domains: usize,
    /// Domains with any TXT record under `_dmarc`
    pub has_dmarc: usize,
    /// Domains with a valid DMARC record
    pub valid_dmarc: usize,
    /// Domains publishing `p=none`
    pub policy_none: usize,
    /// Domains publishing `p=quarantine`
    pub policy_quarantine: usize,
    /// Domains publishing `p=reject`
    pub policy_reject: usize,
}

impl StatsSnapshot {
    /// Count for one policy action.
    pub fn policy_count(&self, action: PolicyAction) -> usize {
        match action {
            PolicyAction::None => self.policy_none,
            PolicyAction::Quarantine => self.policy_quarantine,
            PolicyAction::Reject => self.policy_reject,
        }
    }

    /// `count` as a percentage of all dispatched domains (0.0 before the first).
    pub fn percent(&self, count: usize) -> f64 {
        if self.domains == 0 {
            0.0
        } else {
            count as f64 / self.domains as f64 * 100.0
        }
    }

    /// Dispatched domains per second over `elapsed` (0.0 for a zero duration).
    pub fn rate(&self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            self.domains as f64 / secs
        } else {
            0.0
        }
    }
}
