//! Scheduler tests with in-process transports.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hickory_proto::op::Message;
use tokio::sync::Notify;

use super::*;
use crate::dmarc::PolicyAction;
use crate::dns::test_helpers::txt_response;
use crate::dns::ResolverPool;
use crate::error_handling::QueryError;

/// Serves canned TXT records per query name and remembers which endpoint
/// each name was sent to.
#[derive(Default)]
struct CannedExchange {
    records: HashMap<String, Vec<Vec<&'static str>>>,
    seen: Mutex<HashMap<String, SocketAddr>>,
    calls: AtomicUsize,
}

impl CannedExchange {
    fn with(mut self, domain: &str, records: Vec<Vec<&'static str>>) -> Self {
        self.records.insert(format!("_dmarc.{domain}."), records);
        self
    }
}

#[async_trait]
impl Exchange for CannedExchange {
    async fn exchange(&self, query: &Message, endpoint: SocketAddr) -> Result<Message, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = query.queries()[0].name().to_ascii();
        self.seen.lock().unwrap().insert(name.clone(), endpoint);
        let records = self.records.get(&name).cloned().unwrap_or_default();
        let fragments: Vec<&[&str]> = records.iter().map(|r| r.as_slice()).collect();
        Ok(txt_response(query, &fragments))
    }
}

struct AlwaysFails {
    calls: AtomicUsize,
}

#[async_trait]
impl Exchange for AlwaysFails {
    async fn exchange(&self, _query: &Message, _endpoint: SocketAddr) -> Result<Message, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(QueryError::Timeout(Duration::from_millis(1)))
    }
}

/// Holds every exchange until `release` is notified.
#[derive(Default)]
struct GatedExchange {
    release: Notify,
    entered: AtomicUsize,
}

#[async_trait]
impl Exchange for GatedExchange {
    async fn exchange(&self, query: &Message, _endpoint: SocketAddr) -> Result<Message, QueryError> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(txt_response(query, &[&["v=DMARC1; p=none"]]))
    }
}

/// Yields to spawned tasks until `done` holds, for at most a few thousand turns.
async fn yield_until(mut done: impl FnMut() -> bool) -> bool {
    for _ in 0..5000 {
        if done() {
            return true;
        }
        tokio::task::yield_now().await;
    }
    done()
}

fn pool(endpoints: &[&str]) -> ResolverPool {
    ResolverPool::from_strings(endpoints).unwrap()
}

fn domains(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn test_survey_tallies_findings() {
    let exchange = Arc::new(
        CannedExchange::default()
            .with("reject.example", vec![vec!["v=DMARC1; p=reject; rua=mailto:x"]])
            .with("quarantine.example", vec![vec!["v=DMARC1;p=quarantine"]])
            .with("spf.example", vec![vec!["v=spf1 include:_spf.example.com ~all"]])
            .with(
                "double.example",
                vec![vec!["v=DMARC1; p=none"], vec!["v=DMARC1; p=none; pct=100"]],
            ),
    );
    let executor = QueryExecutor::new(exchange.clone(), 1440);
    let survey = Survey::new(pool(&["192.0.2.1:53"]), executor, 8);

    let report = survey
        .run(domains(&[
            "reject.example",
            "quarantine.example",
            "spf.example",
            "double.example",
            "nothing.example",
        ]))
        .await;

    assert_eq!(
        report.stats,
        StatsSnapshot {
            domains: 5,
            has_dmarc: 4,
            valid_dmarc: 3,
            policy_none: 1,
            policy_quarantine: 1,
            policy_reject: 1,
        }
    );
    assert_eq!(exchange.calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_resolvers_assigned_round_robin_in_dispatch_order() {
    let exchange = Arc::new(CannedExchange::default());
    let executor = QueryExecutor::new(exchange.clone(), 1440);
    let survey = Survey::new(pool(&["192.0.2.1:53", "192.0.2.2:53", "192.0.2.3:53"]), executor, 2);

    let names: Vec<String> = (0..9).map(|i| format!("d{i}.example")).collect();
    survey.run(names.clone()).await;

    let seen = exchange.seen.lock().unwrap();
    for (i, name) in names.iter().enumerate() {
        let expected: SocketAddr = format!("192.0.2.{}:53", i % 3 + 1).parse().unwrap();
        assert_eq!(seen[&format!("_dmarc.{name}.")], expected, "{name}");
    }
}

#[tokio::test]
async fn test_failed_resolution_counts_domain_only() {
    let exchange = Arc::new(AlwaysFails {
        calls: AtomicUsize::new(0),
    });
    let executor = QueryExecutor::new(exchange.clone(), 1440);
    let survey = Survey::new(pool(&["192.0.2.1:53"]), executor, 4);

    let report = survey
        .run(domains(&["a.example", "b.example", "c.example"]))
        .await;

    assert_eq!(report.stats.domains, 3);
    assert_eq!(report.stats.has_dmarc, 0);
    assert_eq!(report.stats.valid_dmarc, 0);
    // 1 attempt + 3 retries per domain
    assert_eq!(exchange.calls.load(Ordering::SeqCst), 12);
}

#[tokio::test]
async fn test_invalid_domain_is_counted_but_never_queried() {
    let exchange = Arc::new(CannedExchange::default());
    let executor = QueryExecutor::new(exchange.clone(), 1440);
    let survey = Survey::new(pool(&["192.0.2.1:53"]), executor, 4);

    let too_long = format!("{}.example", "x".repeat(70));
    let report = survey.run(vec![too_long]).await;

    assert_eq!(report.stats.domains, 1);
    assert_eq!(report.stats.has_dmarc, 0);
    assert_eq!(exchange.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_dispatch_then_finish() {
    let exchange = Arc::new(
        CannedExchange::default().with("example.com", vec![vec!["v=DMARC1; p=reject"]]),
    );
    let executor = QueryExecutor::new(exchange, 1440);
    let mut survey =
        Survey::new(pool(&["192.0.2.1:53"]), executor, 1).with_progress_interval(100);

    survey.dispatch("example.com".to_string()).await;
    survey.dispatch("example.org".to_string()).await;
    assert_eq!(survey.dispatched(), 2);
    let counters = survey.counters();
    assert_eq!(counters.domains(), 2);

    let report = survey.finish().await;
    assert_eq!(report.stats.policy_reject, 1);
    assert_eq!(counters.has_dmarc(), 1);
}

#[tokio::test]
async fn test_permit_released_once_resolution_returns() {
    let exchange = Arc::new(GatedExchange::default());
    let executor = QueryExecutor::new(exchange.clone(), 1440);
    let mut survey =
        Survey::new(pool(&["192.0.2.1:53"]), executor, 2).with_progress_interval(100);
    assert_eq!(survey.available_permits(), 2);

    survey.dispatch("held.example".to_string()).await;
    assert!(yield_until(|| exchange.entered.load(Ordering::SeqCst) == 1).await);
    // Held for the whole network phase
    assert_eq!(survey.available_permits(), 1);

    exchange.release.notify_one();
    assert!(yield_until(|| survey.available_permits() == 2).await);

    // Back to full before anything was joined
    let counters = survey.counters();
    assert_eq!(counters.policy_count(PolicyAction::None), 1);
    let report = survey.finish().await;
    assert_eq!(report.stats.valid_dmarc, 1);
}

#[tokio::test]
async fn test_invalid_domain_releases_permit() {
    let exchange = Arc::new(CannedExchange::default());
    let executor = QueryExecutor::new(exchange, 1440);
    let mut survey =
        Survey::new(pool(&["192.0.2.1:53"]), executor, 1).with_progress_interval(100);

    survey.dispatch(format!("{}.example", "x".repeat(70))).await;
    // A leaked permit would block this dispatch forever
    tokio::time::timeout(
        Duration::from_secs(5),
        survey.dispatch("example.org".to_string()),
    )
    .await
    .expect("second dispatch should get the permit back");

    let report = survey.finish().await;
    assert_eq!(report.stats.domains, 2);
}

#[tokio::test]
async fn test_empty_input() {
    let executor = QueryExecutor::new(Arc::new(CannedExchange::default()), 1440);
    let report = Survey::new(pool(&["192.0.2.1:53"]), executor, 4)
        .run(Vec::new())
        .await;
    assert_eq!(report.stats, StatsSnapshot::default());
    assert_eq!(report.domains_per_second, 0.0);
}

#[test]
fn test_report_serializes() {
    let stats = StatsSnapshot {
        domains: 10,
        has_dmarc: 4,
        ..Default::default()
    };
    let report = SurveyReport::new(stats, Duration::from_secs(2));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["stats"]["domains"], 10);
    assert_eq!(json["stats"]["has_dmarc"], 4);
    assert_eq!(json["elapsed_seconds"], 2.0);
    assert_eq!(json["domains_per_second"], 5.0);
}
