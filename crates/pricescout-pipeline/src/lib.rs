//! The comparison pipeline: generated queries go out to the shopping
//! provider, raw results are filtered for relevance, deduplicated, verified
//! against live retailer pages, price-banded, optionally pruned by the AI
//! collaborator, and ranked local-first.
//!
//! [`Orchestrator::run`] is the only entry point callers need; the stage
//! functions are public for targeted testing and reuse.

pub mod dedupe;
pub mod orchestrator;
pub mod price_band;
pub mod queries;
pub mod rank;
pub mod relevance;

pub use dedupe::dedupe_results;
pub use orchestrator::{
    next_phase, Orchestrator, PipelineSettings, QueryOutcome, SearchPhase, EARLY_STOP_TARGET,
    MAX_COMPARISONS,
};
pub use price_band::filter_by_price_band;
pub use queries::{build_queries, extract_brand, extract_product_type, QueryStrategy, SearchQuery};
pub use rank::rank_local_first;
pub use relevance::is_relevant;
