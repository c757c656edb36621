//! DNS query construction.

use hickory_proto::error::ProtoError;
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};

use crate::config::DMARC_LABEL;

/// Builds the fully qualified `_dmarc.<domain>.` name for a domain.
///
/// The domain is used as given; a trailing dot is added only when missing.
///
/// # Errors
///
/// Returns a `ProtoError` when the result is not a valid DNS name (empty
/// labels, labels over 63 bytes, names over 255 bytes).
pub fn dmarc_query_name(domain: &str) -> Result<Name, ProtoError> {
    let fqdn = if domain.ends_with('.') {
        format!("{DMARC_LABEL}.{domain}")
    } else {
        format!("{DMARC_LABEL}.{domain}.")
    };
    Name::from_ascii(fqdn)
}

/// Builds a recursive query for `name`/`record_type`.
///
/// Every query gets a fresh random ID and an EDNS0 OPT record advertising
/// `edns_payload_size` with the DNSSEC OK bit set.
pub fn build_query(name: &Name, record_type: RecordType, edns_payload_size: u16) -> Message {
    let mut message = Message::new();
    message
        .set_id(rand::random::<u16>())
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(name.clone(), record_type));
    message
        .extensions_mut()
        .get_or_insert_with(Edns::new)
        .set_version(0)
        .set_max_payload(edns_payload_size)
        .set_dnssec_ok(true);
    message
}
