//! Consecutive-failure circuit breaker for the assist service.

use std::sync::atomic::{AtomicU32, Ordering};

/// Counts consecutive failures and opens once they reach the threshold.
///
/// A success while still closed resets the count. Once open, the breaker
/// stays open for the life of the process; callers route around the
/// service via their deterministic fallbacks.
#[derive(Debug)]
pub struct CircuitBreaker {
    threshold: u32,
    consecutive_failures: AtomicU32,
}

impl CircuitBreaker {
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            consecutive_failures: AtomicU32::new(0),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.consecutive_failures.load(Ordering::Relaxed) >= self.threshold
    }

    pub fn record_failure(&self) {
        self.consecutive_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Resets the count, unless the breaker has already opened.
    pub fn record_success(&self) {
        let _ = self.consecutive_failures.fetch_update(
            Ordering::Relaxed,
            Ordering::Relaxed,
            |count| (count < self.threshold).then_some(0),
        );
    }
}
