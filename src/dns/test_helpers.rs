//! Shared builders for DNS unit tests.

use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::rr::rdata::TXT;
use hickory_proto::rr::{Name, RData, Record};

/// Builds a response to `query` carrying one TXT record per entry of `records`,
/// each made of the given fragments.
pub(crate) fn txt_response(query: &Message, records: &[&[&str]]) -> Message {
    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .set_recursion_available(true);
    let name = query
        .queries()
        .first()
        .map(|q| q.name().clone())
        .unwrap_or_else(Name::root);
    if let Some(q) = query.queries().first() {
        response.add_query(q.clone());
    }
    for fragments in records {
        let txt = TXT::new(fragments.iter().map(|f| f.to_string()).collect());
        response.add_answer(Record::from_rdata(name.clone(), 300, RData::TXT(txt)));
    }
    response
}

/// Builds a standalone answer message for `_dmarc.<domain>.`.
pub(crate) fn txt_answer(domain: &str, records: &[&[&str]]) -> Message {
    let name = super::dmarc_query_name(domain).expect("valid test domain");
    let query = super::build_query(&name, hickory_proto::rr::RecordType::TXT, 1440);
    txt_response(&query, records)
}
