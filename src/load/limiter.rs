use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Semaphore, SemaphorePermit};

/// Counting semaphore bounding how many requests execute at once.
///
/// Slots are handed out as [`SlotGuard`]s and returned when the guard drops,
/// whatever path the holder takes out of its request.
#[derive(Debug)]
pub struct ConcurrencyLimiter {
    semaphore: Semaphore,
    capacity: usize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ConcurrencyLimiter {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        let capacity = limit.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Semaphore::new(capacity),
            capacity,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Waits for a free slot.
    pub async fn acquire(&self) -> SlotGuard<'_> {
        // The semaphore is private and never closed.
        let permit = self.semaphore.acquire().await.ok();
        let current = self
            .in_flight
            .fetch_add(1, Ordering::Relaxed)
            .saturating_add(1);
        self.peak_in_flight.fetch_max(current, Ordering::Relaxed);
        SlotGuard {
            _permit: permit,
            limiter: self,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Highest number of slots held at the same time so far.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Relaxed)
    }
}

/// A held slot. Dropping it returns the slot to the limiter.
#[derive(Debug)]
pub struct SlotGuard<'limiter> {
    _permit: Option<SemaphorePermit<'limiter>>,
    limiter: &'limiter ConcurrencyLimiter,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        loop {
            let current = self.limiter.in_flight.load(Ordering::Relaxed);
            let Some(next) = current.checked_sub(1) else {
                break;
            };
            if self
                .limiter
                .in_flight
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                break;
            }
        }
    }
}
