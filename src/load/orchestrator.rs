use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::RunConfig;
use crate::http::{ExecuteRequest, RequestExecutor};
use crate::metrics::{AggregateStats, RequestOutcome};

use super::limiter::ConcurrencyLimiter;
use super::ramp::RampScheduler;
use super::task::ClientTask;

/// Upper bound on the up-front allocation for creation offsets.
const OFFSETS_PREALLOC_LIMIT: usize = 1 << 16;
/// Progress is logged every tenth of the run.
const PROGRESS_STEPS: usize = 10;

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunReport {
    pub stats: AggregateStats,
    pub elapsed: Duration,
    /// Creation time of each client, measured from the start of the run.
    pub creation_offsets: Vec<Duration>,
    pub peak_in_flight: usize,
}

impl RunReport {
    /// Time between the first and the last client creation.
    #[must_use]
    pub fn creation_span(&self) -> Duration {
        match (self.creation_offsets.first(), self.creation_offsets.last()) {
            (Some(first), Some(last)) => last.saturating_sub(*first),
            _ => Duration::ZERO,
        }
    }
}

/// Creates every client task, drives them to completion under the
/// concurrency bound, and folds their outcomes into one [`AggregateStats`].
///
/// All tasks run on the calling task; outcomes are consumed by this single
/// owner, so the statistics need no synchronization.
#[derive(Debug)]
pub struct Orchestrator<E> {
    config: Arc<RunConfig>,
    limiter: ConcurrencyLimiter,
    executor: E,
}

impl Orchestrator<RequestExecutor> {
    #[must_use]
    pub fn new(config: Arc<RunConfig>) -> Self {
        let executor = RequestExecutor::new(&config);
        Self::with_executor(config, executor)
    }
}

impl<E> Orchestrator<E>
where
    E: ExecuteRequest,
{
    #[must_use]
    pub fn with_executor(config: Arc<RunConfig>, executor: E) -> Self {
        let limiter = ConcurrencyLimiter::new(config.concurrency);
        Self {
            config,
            limiter,
            executor,
        }
    }

    #[must_use]
    pub const fn limiter(&self) -> &ConcurrencyLimiter {
        &self.limiter
    }

    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Runs the whole test and returns once every client has finished.
    pub async fn run(&self) -> RunReport {
        let clients = self.config.clients;
        let run_start = Instant::now();
        let mut stats = AggregateStats::new(clients);
        let mut ramp = RampScheduler::new(clients, self.config.ramp);
        let mut creation_offsets = Vec::with_capacity(clients.min(OFFSETS_PREALLOC_LIMIT));
        let mut in_flight = FuturesUnordered::new();
        let mut creating = true;
        let progress_step = clients.checked_div(PROGRESS_STEPS).unwrap_or(0).max(1);

        debug!(
            clients,
            concurrency = self.limiter.capacity(),
            ramped = self.config.is_ramped(),
            mode = ?ramp.mode(),
            "starting run"
        );

        loop {
            tokio::select! {
                next = ramp.next_client(), if creating => {
                    match next {
                        Some(index) => {
                            let offset = run_start.elapsed();
                            creation_offsets.push(offset);
                            in_flight.push(self.run_client(ClientTask::new(index, offset)));
                        }
                        None => {
                            creating = false;
                            debug!(created = ramp.created(), "all clients created");
                        }
                    }
                }
                Some((task, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                    stats.record(&outcome);
                    let completed = stats.recorded();
                    debug!(
                        client = task.index(),
                        created_ms = task.created_at().as_millis(),
                        state = task.state().as_str(),
                        success = outcome.is_success(),
                        category = outcome.category().as_str(),
                        "client finished"
                    );
                    if usize::try_from(completed)
                        .ok()
                        .and_then(|done| done.checked_rem(progress_step))
                        == Some(0)
                    {
                        info!(
                            completed,
                            clients,
                            in_flight = self.limiter.in_flight(),
                            "progress"
                        );
                    }
                }
                else => break,
            }
        }

        let elapsed = run_start.elapsed();
        RunReport {
            stats,
            elapsed,
            creation_offsets,
            peak_in_flight: self.limiter.peak_in_flight(),
        }
    }

    async fn run_client(&self, mut task: ClientTask) -> (ClientTask, RequestOutcome) {
        task.advance();
        let slot = self.limiter.acquire().await;
        task.advance();
        let outcome = self.executor.execute(task.index()).await;
        drop(slot);
        task.advance();
        (task, outcome)
    }
}
