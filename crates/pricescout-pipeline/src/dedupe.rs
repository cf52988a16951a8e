//! Duplicate removal across accumulated query results.

use std::collections::HashSet;

use pricescout_searchapi::RawSearchResult;

/// Drops results already seen under the same URL and title.
///
/// The key is the raw `url|title` pair, not normalized, so the same offer
/// surfaced by different queries collapses while distinct listings on one
/// store survive. First occurrence wins, which keeps the ordering of the
/// more specific earlier queries.
#[must_use]
pub fn dedupe_results(results: Vec<RawSearchResult>) -> Vec<RawSearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|result| {
            let key = format!(
                "{}|{}",
                result.url().unwrap_or_default(),
                result.title.as_deref().unwrap_or_default()
            );
            seen.insert(key)
        })
        .collect()
}
