//! Classification of TXT answers.

use hickory_proto::op::Message;
use hickory_proto::rr::rdata::TXT;
use hickory_proto::rr::RData;
use strum::IntoEnumIterator;

use super::types::{DmarcFinding, PolicyAction};

/// Required first characters of a valid DMARC record.
pub const DMARC_VERSION_PREFIX: &str = "v=DMARC1;";

/// Reassembles a TXT record's character-strings exactly as received.
fn join_fragments(txt: &TXT) -> String {
    txt.txt_data()
        .iter()
        .map(|fragment| String::from_utf8_lossy(fragment))
        .collect()
}

/// Iterates over the TXT records of an answer, one string per record.
///
/// Records of any other type (CNAME chains, RRSIGs from the DO bit) are skipped.
pub fn txt_records(answer: &Message) -> impl Iterator<Item = String> + '_ {
    answer.answers().iter().filter_map(|record| match record.data() {
        Some(RData::TXT(txt)) => Some(join_fragments(txt)),
        _ => None,
    })
}

/// Classifies a single TXT record.
///
/// Every record counts as found. Policies are only tested on valid records.
pub fn classify_record(record: &str) -> DmarcFinding {
    let mut finding = DmarcFinding {
        found: true,
        ..Default::default()
    };
    if !record.starts_with(DMARC_VERSION_PREFIX) {
        return finding;
    }
    finding.valid = true;
    for action in PolicyAction::iter() {
        if action.matches(record) {
            finding.set_policy(action);
        }
    }
    finding
}

/// Classifies all TXT records of one domain, OR-ing the per-record results.
pub fn classify_records<I, S>(records: I) -> DmarcFinding
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    records
        .into_iter()
        .map(|record| classify_record(record.as_ref()))
        .fold(DmarcFinding::default(), DmarcFinding::merge)
}

/// Classifies a domain's answer. No answer yields an all-false finding.
pub fn classify(answer: Option<&Message>) -> DmarcFinding {
    answer
        .map(|message| classify_records(txt_records(message)))
        .unwrap_or_default()
}
