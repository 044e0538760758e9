use std::time::Duration;

use tracing::warn;

use super::histogram::{LatencyHistogram, LatencyPercentiles};
use super::types::{FailureCategory, RequestOutcome};

/// Running totals for one run.
///
/// Owned by the orchestrator and updated from a single task, so no locking is
/// involved. Latencies and bytes only count toward successes.
#[derive(Debug)]
pub struct AggregateStats {
    clients: usize,
    success: u64,
    connect_errors: u64,
    send_errors: u64,
    read_errors: u64,
    timeouts: u64,
    bytes_received: u64,
    latencies: Vec<Duration>,
    latency_sum_nanos: u128,
    histogram: Option<LatencyHistogram>,
}

impl AggregateStats {
    #[must_use]
    pub fn new(clients: usize) -> Self {
        let histogram = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                warn!("Latency percentiles unavailable: {}", err);
                None
            }
        };
        Self {
            clients,
            success: 0,
            connect_errors: 0,
            send_errors: 0,
            read_errors: 0,
            timeouts: 0,
            bytes_received: 0,
            latencies: Vec::new(),
            latency_sum_nanos: 0,
            histogram,
        }
    }

    pub fn record(&mut self, outcome: &RequestOutcome) {
        match outcome.category() {
            FailureCategory::None => self.record_success(outcome),
            FailureCategory::ConnectError => {
                self.connect_errors = self.connect_errors.saturating_add(1);
            }
            FailureCategory::SendError => {
                self.send_errors = self.send_errors.saturating_add(1);
            }
            FailureCategory::ReadError => {
                self.read_errors = self.read_errors.saturating_add(1);
            }
            FailureCategory::Timeout => {
                self.timeouts = self.timeouts.saturating_add(1);
            }
        }
    }

    fn record_success(&mut self, outcome: &RequestOutcome) {
        let latency = outcome.latency();
        self.success = self.success.saturating_add(1);
        self.bytes_received = self.bytes_received.saturating_add(outcome.bytes_read());
        self.latency_sum_nanos = self.latency_sum_nanos.saturating_add(latency.as_nanos());
        self.latencies.push(latency);
        if let Some(histogram) = self.histogram.as_mut()
            && let Err(err) = histogram.record(latency)
        {
            warn!("{}", err);
        }
    }

    #[must_use]
    pub const fn clients(&self) -> usize {
        self.clients
    }

    #[must_use]
    pub const fn success(&self) -> u64 {
        self.success
    }

    #[must_use]
    pub const fn connect_errors(&self) -> u64 {
        self.connect_errors
    }

    #[must_use]
    pub const fn send_errors(&self) -> u64 {
        self.send_errors
    }

    #[must_use]
    pub const fn read_errors(&self) -> u64 {
        self.read_errors
    }

    #[must_use]
    pub const fn timeouts(&self) -> u64 {
        self.timeouts
    }

    /// Send and read errors, reported together.
    #[must_use]
    pub const fn other_errors(&self) -> u64 {
        self.send_errors.saturating_add(self.read_errors)
    }

    /// Number of outcomes recorded across every category.
    #[must_use]
    pub const fn recorded(&self) -> u64 {
        self.success
            .saturating_add(self.connect_errors)
            .saturating_add(self.timeouts)
            .saturating_add(self.other_errors())
    }

    #[must_use]
    pub const fn bytes_received(&self) -> u64 {
        self.bytes_received
    }

    #[must_use]
    pub fn latencies(&self) -> &[Duration] {
        &self.latencies
    }

    /// Mean latency over successes; zero when nothing succeeded.
    #[must_use]
    pub fn mean_latency(&self) -> Duration {
        let count = u128::from(self.success);
        let nanos = self.latency_sum_nanos.checked_div(count).unwrap_or(0);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    #[must_use]
    pub fn percentiles(&self) -> LatencyPercentiles {
        self.histogram
            .as_ref()
            .map(LatencyHistogram::percentiles)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn min_latency(&self) -> Duration {
        self.latencies.iter().min().copied().unwrap_or(Duration::ZERO)
    }

    #[must_use]
    pub fn max_latency(&self) -> Duration {
        self.latencies.iter().max().copied().unwrap_or(Duration::ZERO)
    }
}
