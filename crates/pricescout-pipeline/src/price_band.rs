//! Price plausibility filter against the original listing price.

use pricescout_core::{BandMultipliers, Comparison};
use pricescout_verify::is_google_shopping_url;

/// Keeps comparisons whose price is a plausible multiple of the original.
///
/// Without a positive original price there is no baseline and the list
/// passes through. Google Shopping aggregates listings across conditions
/// and bundles, so when any survivor came from there the wider band applies
/// to the whole set.
#[must_use]
pub fn filter_by_price_band(
    comparisons: Vec<Comparison>,
    original_price: Option<f64>,
    default_band: BandMultipliers,
    shopping_band: BandMultipliers,
) -> Vec<Comparison> {
    let Some(base) = original_price.filter(|price| *price > 0.0) else {
        return comparisons;
    };

    let band = if comparisons
        .iter()
        .any(|comparison| is_google_shopping_url(&comparison.url))
    {
        shopping_band
    } else {
        default_band
    };

    let before = comparisons.len();
    let kept: Vec<Comparison> = comparisons
        .into_iter()
        .filter(|comparison| band.contains(base, comparison.price))
        .collect();
    if kept.len() < before {
        tracing::debug!(
            base,
            low = band.low,
            high = band.high,
            dropped = before - kept.len(),
            "dropped comparisons outside the price band"
        );
    }
    kept
}
