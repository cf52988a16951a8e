//! Deterministic cost/value/quality scoring for verified comparisons.

use pricescout_core::Assessment;

/// Prices within this band around the buyer's own price score as neutral.
const NEAR_PRICE_LOW: f64 = 0.9;
const NEAR_PRICE_HIGH: f64 = 1.1;

/// Scores a comparison against the price the buyer already has.
///
/// Cost is 1 below the near band, 3 above it, 2 inside it; value mirrors
/// cost so cheap offers score high. Without a usable reference price every
/// axis is neutral. Quality is always neutral since nothing in a search
/// result speaks to build quality.
#[must_use]
pub fn build_assessment(price: f64, original_price: Option<f64>, store: &str) -> Assessment {
    let description = if store.is_empty() || store == "unknown" {
        "Found via product search".to_string()
    } else {
        format!("Found on {store}")
    };

    let Some(base) = original_price.filter(|base| *base > 0.0) else {
        return Assessment {
            cost: 2,
            value: 2,
            quality: 2,
            description,
        };
    };

    let cost = if price < base * NEAR_PRICE_LOW {
        1
    } else if price > base * NEAR_PRICE_HIGH {
        3
    } else {
        2
    };

    Assessment {
        cost,
        value: 4 - cost,
        quality: 2,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cheap_offer_scores_low_cost_high_value() {
        let a = build_assessment(199.0, Some(300.0), "amazon.de");
        assert_eq!((a.cost, a.value, a.quality), (1, 3, 2));
        assert_eq!(a.description, "Found on amazon.de");
    }

    #[test]
    fn expensive_offer_scores_high_cost_low_value() {
        let a = build_assessment(400.0, Some(300.0), "amazon.de");
        assert_eq!((a.cost, a.value, a.quality), (3, 1, 2));
    }

    #[test]
    fn near_band_is_neutral_and_inclusive() {
        // Exactly 0.9x and 1.1x sit inside the band.
        let low = build_assessment(270.0, Some(300.0), "amazon.de");
        let high = build_assessment(330.0, Some(300.0), "amazon.de");
        assert_eq!(low.cost, 2);
        assert_eq!(high.cost, 2);
    }

    #[test]
    fn missing_reference_price_scores_neutral() {
        let a = build_assessment(279.0, None, "amazon.de");
        assert_eq!((a.cost, a.value, a.quality), (2, 2, 2));
    }

    #[test]
    fn zero_reference_price_scores_neutral() {
        let a = build_assessment(279.0, Some(0.0), "amazon.de");
        assert_eq!((a.cost, a.value, a.quality), (2, 2, 2));
    }

    #[test]
    fn unknown_store_gets_generic_description() {
        let a = build_assessment(279.0, Some(300.0), "unknown");
        assert_eq!(a.description, "Found via product search");
        let b = build_assessment(279.0, Some(300.0), "");
        assert_eq!(b.description, "Found via product search");
    }
}
