//! Drives one comparison run: queries out, verified comparisons back.

use futures::stream::{self, StreamExt};
use uuid::Uuid;

use pricescout_assist::{clean_title_fallback, Assist, GuardedAssist};
use pricescout_core::{
    country_to_gl, BandMultipliers, Comparison, ProductDescriptor, RetailerDirectory,
};
use pricescout_searchapi::{SearchApiClient, SearchApiError};
use pricescout_verify::Validator;

use crate::dedupe::dedupe_results;
use crate::price_band::filter_by_price_band;
use crate::queries::build_queries;
use crate::rank::rank_local_first;
use crate::relevance::is_relevant;

/// Accumulated relevant results that end the query loop early.
pub const EARLY_STOP_TARGET: usize = 3;
/// Hard cap on comparisons carried past verification.
pub const MAX_COMPARISONS: usize = 10;
/// Live-page verifications in flight at once.
const VALIDATION_CONCURRENCY: usize = 10;

/// Where the query loop stands. Only `Searching` continues the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Searching,
    EarlyStopped,
    Exhausted,
    RateLimitAborted,
}

/// What one query attempt produced, as far as the loop cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Provider answered; carries the accumulated relevant-result count.
    Searched { accumulated: usize },
    /// Provider failed for this query only.
    Failed,
    /// Provider told us to back off; no further query may be sent.
    RateLimited,
}

/// The single transition function for the query loop.
#[must_use]
pub fn next_phase(outcome: QueryOutcome, queries_left: usize, early_stop_target: usize) -> SearchPhase {
    match outcome {
        QueryOutcome::RateLimited => SearchPhase::RateLimitAborted,
        QueryOutcome::Searched { accumulated } if accumulated >= early_stop_target => {
            SearchPhase::EarlyStopped
        }
        QueryOutcome::Searched { .. } | QueryOutcome::Failed => {
            if queries_left == 0 {
                SearchPhase::Exhausted
            } else {
                SearchPhase::Searching
            }
        }
    }
}

/// Tunables for one pipeline instance.
#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    pub early_stop_target: usize,
    pub max_comparisons: usize,
    pub default_band: BandMultipliers,
    pub shopping_band: BandMultipliers,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            early_stop_target: EARLY_STOP_TARGET,
            max_comparisons: MAX_COMPARISONS,
            default_band: BandMultipliers::new(0.4, 2.0),
            shopping_band: BandMultipliers::new(0.1, 3.0),
        }
    }
}

/// Runs the full pipeline for one product.
///
/// Failure policy: individual queries and individual results fail quietly;
/// the run as a whole never errors. An empty list means the provider was
/// unavailable or nothing survived verification, never that something was
/// fabricated.
pub struct Orchestrator<A> {
    search_client: SearchApiClient,
    validator: Validator,
    retailers: RetailerDirectory,
    assist: Option<GuardedAssist<A>>,
    settings: PipelineSettings,
}

impl<A: Assist> Orchestrator<A> {
    pub fn new(
        search_client: SearchApiClient,
        validator: Validator,
        retailers: RetailerDirectory,
        assist: Option<GuardedAssist<A>>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            search_client,
            validator,
            retailers,
            assist,
            settings,
        }
    }

    /// Finds comparison offers for the described product.
    pub async fn run(&self, descriptor: &ProductDescriptor) -> Vec<Comparison> {
        let run_id = Uuid::new_v4();
        tracing::info!(
            %run_id,
            title = %descriptor.title,
            country = %descriptor.country,
            "starting comparison run"
        );

        let cleaned_title = match &self.assist {
            Some(assist) => assist.clean_title_or_fallback(&descriptor.title).await,
            None => clean_title_fallback(&descriptor.title),
        };
        tracing::debug!(cleaned_title, "searchable title");

        // When cleaning strips the whole title, relevance falls back to the
        // original so model-less products can still match on words.
        let relevance_title = if cleaned_title.is_empty() {
            descriptor.title.trim()
        } else {
            cleaned_title.as_str()
        };

        let queries = build_queries(descriptor, &cleaned_title);
        if queries.is_empty() {
            tracing::warn!(%run_id, "no usable search queries, returning no comparisons");
            return Vec::new();
        }

        let gl = country_to_gl(&descriptor.country);
        let mut phase = SearchPhase::Searching;
        let mut accumulated = Vec::new();
        let mut any_failed = false;

        for (index, query) in queries.iter().enumerate() {
            let outcome = match self.search_client.search(&query.text, gl).await {
                Ok(results) => {
                    let found = results.len();
                    accumulated.extend(
                        results
                            .into_iter()
                            .filter(|raw| is_relevant(raw, descriptor, relevance_title)),
                    );
                    tracing::debug!(
                        query = %query.text,
                        strategy = ?query.strategy,
                        found,
                        accumulated = accumulated.len(),
                        "query searched"
                    );
                    QueryOutcome::Searched {
                        accumulated: accumulated.len(),
                    }
                }
                Err(SearchApiError::RateLimited { cooldown_secs }) => {
                    any_failed = true;
                    tracing::warn!(
                        query = %query.text,
                        cooldown_secs,
                        "rate limited, aborting remaining queries"
                    );
                    QueryOutcome::RateLimited
                }
                Err(e) => {
                    any_failed = true;
                    tracing::warn!(query = %query.text, error = %e, "search query failed");
                    QueryOutcome::Failed
                }
            };

            phase = next_phase(outcome, queries.len() - index - 1, self.settings.early_stop_target);
            if phase != SearchPhase::Searching {
                break;
            }
        }

        if accumulated.is_empty() && (any_failed || phase == SearchPhase::RateLimitAborted) {
            tracing::warn!(%run_id, ?phase, "provider unavailable, returning no comparisons");
            return Vec::new();
        }

        let unique = dedupe_results(accumulated);
        tracing::debug!(unique = unique.len(), ?phase, "verifying unique results");

        let verified: Vec<Option<Comparison>> = stream::iter(unique)
            .map(|raw| async move {
                match self.validator.validate(&raw, descriptor).await {
                    Ok(comparison) => Some(comparison),
                    Err(e) => {
                        tracing::debug!(error = %e, "dropped result during verification");
                        None
                    }
                }
            })
            .buffered(VALIDATION_CONCURRENCY)
            .collect()
            .await;
        let mut comparisons: Vec<Comparison> = verified.into_iter().flatten().collect();
        comparisons.truncate(self.settings.max_comparisons);

        let comparisons = filter_by_price_band(
            comparisons,
            descriptor.price,
            self.settings.default_band,
            self.settings.shopping_band,
        );

        let comparisons = match &self.assist {
            Some(assist) => assist.validate_or_passthrough(descriptor, comparisons).await,
            None => comparisons,
        };

        let ranked = rank_local_first(comparisons, &self.retailers, &descriptor.country);
        tracing::info!(%run_id, comparisons = ranked.len(), "comparison run finished");
        ranked
    }
}
