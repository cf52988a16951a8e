//! Process-wide pacing for calls to the search provider.
//!
//! The provider meters usage per API key, so every outgoing search in the
//! process shares one limiter: consecutive calls are spaced a minimum
//! interval apart, and a 429 response opens a cooldown window that blocks
//! the next acquisition until it has passed.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug)]
struct LimiterState {
    last_call_at: Option<Instant>,
    cooldown_until: Option<Instant>,
}

/// Serializes outgoing search calls, enforcing minimum spacing and the
/// post-429 cooldown.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    cooldown: Duration,
    state: Mutex<LimiterState>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(min_interval: Duration, cooldown: Duration) -> Self {
        Self {
            min_interval,
            cooldown,
            state: Mutex::new(LimiterState {
                last_call_at: None,
                cooldown_until: None,
            }),
        }
    }

    /// Waits until the next call is allowed, then claims the slot.
    ///
    /// The internal lock is held across the wait so concurrent callers queue
    /// behind each other instead of racing for the same slot.
    pub async fn acquire(&self) {
        let mut state = self.state.lock().await;

        if let Some(until) = state.cooldown_until.take() {
            let now = Instant::now();
            if now < until {
                tracing::warn!(
                    remaining_secs = (until - now).as_secs(),
                    "search provider cooldown active, waiting"
                );
                tokio::time::sleep_until(until).await;
            }
        }

        if let Some(last) = state.last_call_at {
            let earliest = last + self.min_interval;
            if Instant::now() < earliest {
                tokio::time::sleep_until(earliest).await;
            }
        }

        state.last_call_at = Some(Instant::now());
    }

    /// Records a 429 from the provider, opening the cooldown window.
    ///
    /// Returns the cooldown duration so callers can surface it in errors.
    pub async fn report_rate_limited(&self) -> Duration {
        let mut state = self.state.lock().await;
        state.cooldown_until = Some(Instant::now() + self.cooldown);
        self.cooldown
    }
}
