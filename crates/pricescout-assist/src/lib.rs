//! Optional AI collaborator for the comparison pipeline.
//!
//! The pipeline asks it for two favors: turn a noisy retailer title into a
//! searchable one, and prune a finished comparison list down to offers that
//! really match the product. Both are advisory. The pipeline must produce
//! the same shape of output with this crate disabled, rate limited, or
//! misbehaving, so every caller goes through [`GuardedAssist`], which wraps
//! a [`CircuitBreaker`] and deterministic fallbacks around any [`Assist`]
//! implementation.

use async_trait::async_trait;

use pricescout_core::{Comparison, ProductDescriptor};

pub mod breaker;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod guard;
pub mod parse;

pub use breaker::CircuitBreaker;
pub use error::AssistError;
pub use fallback::clean_title_fallback;
pub use gemini::{GeminiAssist, DEFAULT_MODEL};
pub use guard::GuardedAssist;
pub use parse::{extract_json, parse_comparison_array};

/// A text-generation service the pipeline can lean on.
#[async_trait]
pub trait Assist: Send + Sync {
    /// Rewrites a raw product title into its essential searchable form.
    /// An empty string means the service had nothing useful to say.
    async fn clean_title(&self, title: &str) -> Result<String, AssistError>;

    /// Filters a comparison list down to entries matching the descriptor's
    /// product.
    async fn validate_comparisons(
        &self,
        descriptor: &ProductDescriptor,
        comparisons: &[Comparison],
    ) -> Result<Vec<Comparison>, AssistError>;
}
