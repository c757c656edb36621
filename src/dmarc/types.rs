//! DMARC finding and policy types.

use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;

/// Policy action published in a DMARC `p=` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    /// `p=none`: monitor only
    None,
    /// `p=quarantine`: treat failing mail as suspicious
    Quarantine,
    /// `p=reject`: refuse failing mail
    Reject,
}

impl PolicyAction {
    /// Tag value as it appears after `p=`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyAction::None => "none",
            PolicyAction::Quarantine => "quarantine",
            PolicyAction::Reject => "reject",
        }
    }

    /// The two accepted spellings of the tag: after a space or after a semicolon.
    pub fn patterns(&self) -> [&'static str; 2] {
        match self {
            PolicyAction::None => [" p=none", ";p=none"],
            PolicyAction::Quarantine => [" p=quarantine", ";p=quarantine"],
            PolicyAction::Reject => [" p=reject", ";p=reject"],
        }
    }

    /// Substring test against a whole record. Not anchored, not tag-aware.
    pub fn matches(&self, record: &str) -> bool {
        self.patterns()
            .iter()
            .any(|pattern| record.contains(pattern))
    }
}

impl std::fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one domain contributes to the aggregate counters.
///
/// Each flag is domain-level: it is set if any TXT record satisfied the test.
/// `valid` implies `found`, and every policy flag implies `valid`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DmarcFinding {
    /// At least one TXT record exists at `_dmarc.<domain>`
    pub found: bool,
    /// At least one record starts with `v=DMARC1;`
    pub valid: bool,
    /// A valid record carries `p=none`
    pub policy_none: bool,
    /// A valid record carries `p=quarantine`
    pub policy_quarantine: bool,
    /// A valid record carries `p=reject`
    pub policy_reject: bool,
}

impl DmarcFinding {
    /// Returns whether the finding carries the given policy.
    pub fn has_policy(&self, action: PolicyAction) -> bool {
        match action {
            PolicyAction::None => self.policy_none,
            PolicyAction::Quarantine => self.policy_quarantine,
            PolicyAction::Reject => self.policy_reject,
        }
    }

    pub(crate) fn set_policy(&mut self, action: PolicyAction) {
        match action {
            PolicyAction::None => self.policy_none = true,
            PolicyAction::Quarantine => self.policy_quarantine = true,
            PolicyAction::Reject => self.policy_reject = true,
        }
    }

    /// Flag-wise OR of two findings for the same domain.
    pub fn merge(self, other: DmarcFinding) -> DmarcFinding {
        DmarcFinding {
            found: self.found || other.found,
            valid: self.valid || other.valid,
            policy_none: self.policy_none || other.policy_none,
            policy_quarantine: self.policy_quarantine || other.policy_quarantine,
            policy_reject: self.policy_reject || other.policy_reject,
        }
    }
}
