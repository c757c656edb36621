//! Thread-safe survey counters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::snapshot::StatsSnapshot;
use crate::dmarc::{DmarcFinding, PolicyAction};

/// Thread-safe DMARC tallies.
///
/// Shared across tasks with `Arc`. Each counter is an independent atomic, so
/// concurrent folds never lose an increment; a snapshot taken mid-run may mix
/// values from before and after a fold, which is fine for progress output.
pub struct DmarcCounters {
    domains: AtomicUsize,
    has_dmarc: AtomicUsize,
    valid_dmarc: AtomicUsize,
    policies: HashMap<PolicyAction, AtomicUsize>,
}

impl DmarcCounters {
    /// Creates counters with every tally at zero.
    pub fn new() -> Self {
        let mut policies = HashMap::new();
        for action in PolicyAction::iter() {
            policies.insert(action, AtomicUsize::new(0));
        }

        DmarcCounters {
            domains: AtomicUsize::new(0),
            has_dmarc: AtomicUsize::new(0),
            valid_dmarc: AtomicUsize::new(0),
            policies,
        }
    }

    /// Counts a dispatched domain, whatever its later outcome.
    ///
    /// Returns the number of domains dispatched so far, this one included.
    pub fn record_domain(&self) -> usize {
        self.domains.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Folds one domain's finding into the tallies.
    pub fn fold(&self, finding: &DmarcFinding) {
        if finding.found {
            self.has_dmarc.fetch_add(1, Ordering::Relaxed);
        }
        if finding.valid {
            self.valid_dmarc.fetch_add(1, Ordering::Relaxed);
        }
        for action in PolicyAction::iter() {
            if finding.has_policy(action) {
                if let Some(counter) = self.policies.get(&action) {
                    counter.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    /// Domains dispatched so far.
    pub fn domains(&self) -> usize {
        self.domains.load(Ordering::SeqCst)
    }

    /// Domains with at least one TXT record under `_dmarc`.
    pub fn has_dmarc(&self) -> usize {
        self.has_dmarc.load(Ordering::SeqCst)
    }

    /// Domains with a record starting with `v=DMARC1;`.
    pub fn valid_dmarc(&self) -> usize {
        self.valid_dmarc.load(Ordering::SeqCst)
    }

    /// Domains whose valid record carries `action`.
    pub fn policy_count(&self, action: PolicyAction) -> usize {
        self.policies
            .get(&action)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Copies the current values.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            domains: self.domains(),
            has_dmarc: self.has_dmarc(),
            valid_dmarc: self.valid_dmarc(),
            policy_none: self.policy_count(PolicyAction::None),
            policy_quarantine: self.policy_count(PolicyAction::Quarantine),
            policy_reject: self.policy_count(PolicyAction::Reject),
        }
    }
}

impl Default for DmarcCounters {
    fn default() -> Self {
        Self::new()
    }
}
