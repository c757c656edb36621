//! DMARC record classification.
//!
//! Turns the TXT answer for `_dmarc.<domain>` into a per-domain
//! [`DmarcFinding`]. Matching is deliberately literal:
//! - any TXT record at the name counts as a DMARC candidate
//! - a record is valid when it starts with `v=DMARC1;` (case-sensitive)
//! - a policy matches when ` p=<action>` or `;p=<action>` appears anywhere
//!   in a valid record
//!
//! Findings are OR-ed across records so a domain is never counted twice.

mod classify;
mod types;

// Re-export public API
pub use classify::{classify, classify_record, classify_records, txt_records, DMARC_VERSION_PREFIX};
pub use types::{DmarcFinding, PolicyAction};
