use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Sleep, sleep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampMode {
    /// Every client is created at once.
    Immediate,
    /// Clients are created one at a time, `interval` apart.
    Staggered { interval: Duration },
}

/// Hands out client indices at the configured creation rate.
///
/// In staggered mode the scheduler sleeps `ramp / clients` after every
/// creation, including the last, so the total span is close to `ramp` but
/// drifts with scheduling overhead.
#[derive(Debug)]
pub struct RampScheduler {
    clients: usize,
    created: usize,
    mode: RampMode,
    pending_delay: Option<Pin<Box<Sleep>>>,
}

impl RampScheduler {
    #[must_use]
    pub fn new(clients: usize, ramp: Duration) -> Self {
        let mode = if ramp.is_zero() || clients == 0 {
            RampMode::Immediate
        } else {
            let divisor = u32::try_from(clients).unwrap_or(u32::MAX);
            RampMode::Staggered {
                interval: ramp.checked_div(divisor).unwrap_or(Duration::ZERO),
            }
        };
        Self {
            clients,
            created: 0,
            mode,
            pending_delay: None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> RampMode {
        self.mode
    }

    #[must_use]
    pub const fn created(&self) -> usize {
        self.created
    }

    /// Returns the next client index, or `None` once every client exists.
    ///
    /// Cancel safe: a pending inter-arrival delay survives the future being
    /// dropped and is resumed by the next call.
    pub async fn next_client(&mut self) -> Option<usize> {
        if let Some(delay) = self.pending_delay.as_mut() {
            delay.as_mut().await;
            self.pending_delay = None;
        }
        if self.created >= self.clients {
            return None;
        }

        let index = self.created;
        self.created = self.created.saturating_add(1);
        if let RampMode::Staggered { interval } = self.mode {
            self.pending_delay = Some(Box::pin(sleep(interval)));
        }
        Some(index)
    }
}
