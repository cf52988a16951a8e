//! Final ordering: hometown stores first, cheapest first within each group.

use pricescout_core::{Comparison, RetailerDirectory};

/// Stable sort putting local retailers ahead of the rest, each group in
/// ascending price order.
///
/// A comparison counts as local when its store or its URL contains one of
/// the country's retailer domains. The URL check covers stores reported
/// under a display name like "MediaMarkt" instead of a domain.
#[must_use]
pub fn rank_local_first(
    mut comparisons: Vec<Comparison>,
    directory: &RetailerDirectory,
    country: &str,
) -> Vec<Comparison> {
    let domains = directory.domains_for(country);
    comparisons.sort_by(|a, b| {
        let a_local = is_local(a, domains);
        let b_local = is_local(b, domains);
        b_local
            .cmp(&a_local)
            .then_with(|| a.price.total_cmp(&b.price))
    });
    comparisons
}

fn is_local(comparison: &Comparison, domains: &[String]) -> bool {
    let store = comparison.store.to_lowercase();
    let url = comparison.url.to_lowercase();
    domains.iter().any(|domain| {
        let domain = domain.to_lowercase();
        store.contains(&domain) || url.contains(&domain)
    })
}
