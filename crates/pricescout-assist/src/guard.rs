//! Breaker-guarded front door the pipeline talks to.

use pricescout_core::{Comparison, ProductDescriptor};

use crate::breaker::CircuitBreaker;
use crate::error::AssistError;
use crate::fallback::clean_title_fallback;
use crate::Assist;

/// Wraps an [`Assist`] implementation so the pipeline never has to care
/// whether the service is up.
///
/// Every operation has a deterministic degraded form: title cleaning falls
/// back to the stop-word cleaner, comparison validation passes the list
/// through unfiltered. The breaker opens after a fixed number of
/// consecutive service failures and stays open for the process lifetime.
pub struct GuardedAssist<A> {
    inner: A,
    breaker: CircuitBreaker,
}

impl<A: Assist> GuardedAssist<A> {
    pub fn new(inner: A, failure_threshold: u32) -> Self {
        Self {
            inner,
            breaker: CircuitBreaker::new(failure_threshold),
        }
    }

    /// Cleans a title via the service, or deterministically when the
    /// service is open-circuited, failing, or silent.
    ///
    /// An empty service reply falls back without counting as a failure.
    pub async fn clean_title_or_fallback(&self, title: &str) -> String {
        if self.breaker.is_open() {
            tracing::debug!("assist breaker open, cleaning title locally");
            return clean_title_fallback(title);
        }
        match self.inner.clean_title(title).await {
            Ok(cleaned) => {
                let cleaned = cleaned.trim();
                if cleaned.is_empty() {
                    tracing::debug!("assist returned an empty title, cleaning locally");
                    clean_title_fallback(title)
                } else {
                    self.breaker.record_success();
                    cleaned.to_owned()
                }
            }
            Err(e) => {
                self.breaker.record_failure();
                tracing::warn!(error = %e, "assist title cleaning failed, cleaning locally");
                clean_title_fallback(title)
            }
        }
    }

    /// Lets the service prune the comparison list; any trouble keeps the
    /// list unchanged.
    ///
    /// Unparseable service output does not count toward the breaker; only
    /// transport and status failures do.
    pub async fn validate_or_passthrough(
        &self,
        descriptor: &ProductDescriptor,
        comparisons: Vec<Comparison>,
    ) -> Vec<Comparison> {
        if comparisons.is_empty() || self.breaker.is_open() {
            return comparisons;
        }
        match self.inner.validate_comparisons(descriptor, &comparisons).await {
            Ok(filtered) => {
                self.breaker.record_success();
                tracing::debug!(
                    before = comparisons.len(),
                    after = filtered.len(),
                    "assist validated comparison list"
                );
                filtered
            }
            Err(AssistError::MalformedOutput { reason }) => {
                tracing::debug!(reason, "assist validation output unusable, keeping full list");
                comparisons
            }
            Err(e) => {
                self.breaker.record_failure();
                tracing::warn!(error = %e, "assist validation failed, keeping full list");
                comparisons
            }
        }
    }
}
