// Shared test helpers: stub transports and input files.
//
// This module provides in-process `Exchange` implementations so integration
// tests never touch the network.

use std::collections::HashMap;
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::rr::rdata::TXT;
use hickory_proto::rr::{RData, Record};
use tempfile::NamedTempFile;

use dmarc_survey::dns::Exchange;
use dmarc_survey::{Config, QueryError};

/// Builds a response to `query` with one TXT record per entry in `records`.
pub fn txt_response(query: &Message, records: &[Vec<String>]) -> Message {
    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .set_recursion_available(true);
    let question = query.queries()[0].clone();
    let name = question.name().clone();
    response.add_query(question);
    for fragments in records {
        let txt = TXT::new(fragments.clone());
        response.add_answer(Record::from_rdata(name.clone(), 300, RData::TXT(txt)));
    }
    response
}

/// Deterministic resolver: fixed TXT records per domain, empty answer otherwise.
#[derive(Default)]
pub struct MockResolver {
    records: HashMap<String, Vec<Vec<String>>>,
    pub calls: AtomicUsize,
}

impl MockResolver {
    pub fn with(mut self, domain: &str, records: &[&str]) -> Self {
        self.records.insert(
            format!("_dmarc.{domain}."),
            records.iter().map(|r| vec![r.to_string()]).collect(),
        );
        self
    }
}

#[async_trait]
impl Exchange for MockResolver {
    async fn exchange(&self, query: &Message, _endpoint: SocketAddr) -> Result<Message, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = query.queries()[0].name().to_ascii();
        let records = self.records.get(&name).cloned().unwrap_or_default();
        Ok(txt_response(query, &records))
    }
}

/// Counts concurrent invocations and remembers the peak.
pub struct InstrumentedResolver {
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub calls: AtomicUsize,
    delay: Duration,
}

impl InstrumentedResolver {
    pub fn new(delay: Duration) -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            delay,
        }
    }
}

#[async_trait]
impl Exchange for InstrumentedResolver {
    async fn exchange(&self, query: &Message, _endpoint: SocketAddr) -> Result<Message, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(txt_response(query, &[vec!["v=DMARC1; p=none".to_string()]]))
    }
}

/// Fails every attempt.
#[derive(Default)]
pub struct FailingResolver {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Exchange for FailingResolver {
    async fn exchange(&self, _query: &Message, _endpoint: SocketAddr) -> Result<Message, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(QueryError::Timeout(Duration::from_millis(1)))
    }
}

/// Writes `lines` to a temporary input file.
pub fn domain_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{line}").expect("Failed to write temp file");
    }
    file
}

/// Config pointing at `path` with documentation-range resolvers.
#[allow(dead_code)] // Not every test file uses it
pub fn test_config(path: PathBuf, max_concurrency: usize) -> Config {
    Config {
        file: path,
        max_concurrency,
        resolvers: vec!["192.0.2.1:53".to_string(), "192.0.2.2:53".to_string()],
        progress_interval: 1000,
        ..Default::default()
    }
}
