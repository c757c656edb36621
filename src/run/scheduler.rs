//! Bounded-concurrency dispatch of domain tasks.

use std::sync::Arc;
use std::time::Instant;

use log::warn;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::task::{process_domain_task, DomainTaskParams};
use super::SurveyReport;
use crate::app::{log_final, log_progress};
use crate::config::DEFAULT_PROGRESS_INTERVAL;
use crate::dns::{QueryExecutor, ResolverPool};
use crate::initialization::init_semaphore;
use crate::statistics::DmarcCounters;

/// Dispatches one task per domain, at most `max_concurrency` resolving at once.
///
/// Domains are dispatched in input order and assigned resolvers round-robin
/// over that order. Completion order is unconstrained.
pub struct Survey {
    pool: Arc<ResolverPool>,
    executor: Arc<QueryExecutor>,
    semaphore: Arc<Semaphore>,
    counters: Arc<DmarcCounters>,
    tasks: JoinSet<()>,
    dispatched: usize,
    progress_interval: usize,
    start_time: Instant,
}

impl Survey {
    /// Creates a survey with a token pool of `max_concurrency` permits.
    pub fn new(pool: ResolverPool, executor: QueryExecutor, max_concurrency: usize) -> Self {
        Self {
            pool: Arc::new(pool),
            executor: Arc::new(executor),
            semaphore: init_semaphore(max_concurrency),
            counters: Arc::new(DmarcCounters::new()),
            tasks: JoinSet::new(),
            dispatched: 0,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            start_time: Instant::now(),
        }
    }

    /// Logs progress every `interval` dispatches (values below 1 are treated as 1).
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Shared counters, readable while the survey runs.
    pub fn counters(&self) -> Arc<DmarcCounters> {
        Arc::clone(&self.counters)
    }

    /// Number of domains dispatched so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Permits not held by a resolving task.
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Dispatches one domain.
    ///
    /// Waits only while every permit is taken; the spawned task runs
    /// independently and is joined in [`Survey::finish`].
    pub async fn dispatch(&mut self, domain: String) {
        let permit = match Arc::clone(&self.semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Semaphore closed, skipping domain: {domain}");
                return;
            }
        };

        let endpoint = self.pool.select(self.dispatched);
        self.dispatched += 1;
        let total = self.counters.record_domain();

        self.tasks.spawn(process_domain_task(DomainTaskParams {
            domain,
            endpoint,
            executor: Arc::clone(&self.executor),
            counters: Arc::clone(&self.counters),
            permit,
        }));

        // Reap finished tasks so the join set stays proportional to in-flight work
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(join_error) = result {
                warn!("Task panicked: {join_error:?}");
            }
        }

        if total % self.progress_interval == 0 {
            log_progress(self.start_time, &self.counters);
        }
    }

    /// Waits for every outstanding task and reports the final counters.
    pub async fn finish(mut self) -> SurveyReport {
        while let Some(result) = self.tasks.join_next().await {
            if let Err(join_error) = result {
                warn!("Task panicked: {join_error:?}");
            }
        }

        let elapsed = self.start_time.elapsed();
        let stats = self.counters.snapshot();
        log_final(&stats, elapsed);
        SurveyReport::new(stats, elapsed)
    }

    /// Dispatches every domain in order, then joins.
    pub async fn run<I>(mut self, domains: I) -> SurveyReport
    where
        I: IntoIterator<Item = String>,
    {
        for domain in domains {
            self.dispatch(domain).await;
        }
        self.finish().await
    }
}
