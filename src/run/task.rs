//! Per-domain task processing.
//!
//! This module contains the logic for surveying a single domain: resolve,
//! release the concurrency permit, classify, fold into the counters.

use std::net::SocketAddr;
use std::sync::Arc;

use hickory_proto::rr::RecordType;
use log::{debug, warn};
use tokio::sync::OwnedSemaphorePermit;

use crate::dmarc::classify;
use crate::dns::{dmarc_query_name, QueryExecutor};
use crate::statistics::DmarcCounters;

/// Everything one domain task needs.
pub(crate) struct DomainTaskParams {
    pub domain: String,
    pub endpoint: SocketAddr,
    pub executor: Arc<QueryExecutor>,
    pub counters: Arc<DmarcCounters>,
    pub permit: OwnedSemaphorePermit,
}

/// Process a single domain.
///
/// The permit covers only the network phase; it is released as soon as the
/// executor returns so classification never holds up the next query.
pub(crate) async fn process_domain_task(params: DomainTaskParams) {
    let DomainTaskParams {
        domain,
        endpoint,
        executor,
        counters,
        permit,
    } = params;

    let name = match dmarc_query_name(&domain) {
        Ok(name) => name,
        Err(e) => {
            warn!("{domain}: not a valid DNS name: {e}");
            return;
        }
    };

    let answer = executor.resolve(&name, RecordType::TXT, endpoint).await;
    drop(permit);

    let finding = classify(answer.as_ref());
    debug!("{name}: {finding:?}");
    counters.fold(&finding);
}
