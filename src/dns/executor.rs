//! Query execution with bounded retries.

use std::net::SocketAddr;
use std::sync::Arc;

use hickory_proto::op::Message;
use hickory_proto::rr::{Name, RecordType};
use log::{debug, warn};

use crate::config::MAX_QUERY_RETRIES;
use crate::dns::client::Exchange;
use crate::dns::query::build_query;

/// Resolves names through a shared `Exchange`, retrying failed attempts.
///
/// Retries are immediate and always go to the endpoint chosen at dispatch; a
/// slow resolver is not traded for another one mid-domain.
pub struct QueryExecutor {
    client: Arc<dyn Exchange>,
    edns_payload_size: u16,
    max_retries: u32,
}

impl QueryExecutor {
    /// Creates an executor with the standard retry bound (`MAX_QUERY_RETRIES`).
    pub fn new(client: Arc<dyn Exchange>, edns_payload_size: u16) -> Self {
        Self {
            client,
            edns_payload_size,
            max_retries: MAX_QUERY_RETRIES,
        }
    }

    /// Overrides the retry bound.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Total attempts per resolution (first try plus retries).
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Resolves `name`/`record_type` against `endpoint`.
    ///
    /// Every failed attempt is logged at `warn`. Returns `None` once all
    /// attempts have failed; that is not an error for the caller, the domain
    /// just has nothing to classify.
    pub async fn resolve(
        &self,
        name: &Name,
        record_type: RecordType,
        endpoint: SocketAddr,
    ) -> Option<Message> {
        let attempts = self.max_attempts();
        for attempt in 1..=attempts {
            let query = build_query(name, record_type, self.edns_payload_size);
            match self.client.exchange(&query, endpoint).await {
                Ok(response) => return Some(response),
                Err(e) => {
                    warn!("{name}: Error resolving: {e} (server {endpoint}, attempt {attempt}/{attempts})");
                }
            }
        }
        debug!("{name}: no answer after {attempts} attempts (server {endpoint})");
        None
    }
}
