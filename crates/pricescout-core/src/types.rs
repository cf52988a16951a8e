use serde::{Deserialize, Serialize};

/// The product a comparison run starts from, as described on the page the
/// user is shopping on.
///
/// Only `title` is guaranteed; model, brand, and price are carried when the
/// caller knows them and sharpen the search queries and price filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub title: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    /// Price on the originating page, used as the plausibility baseline.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Country name or 2-letter code; drives provider locale and ranking.
    pub country: String,
}

fn default_currency() -> String {
    "€".to_string()
}

/// One verified offer for the product at another retailer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub title: String,
    pub store: String,
    pub price: f64,
    pub currency: String,
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    pub condition: String,
    pub assessment: Assessment,
}

/// Cosmetic 1-3 scoring of an offer relative to the original listing.
///
/// Never used for filtering; downstream UIs render it as a quick signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub cost: u8,
    pub value: u8,
    pub quality: u8,
    pub description: String,
}

/// Lower/upper multipliers applied to the original price when deciding
/// whether a found price is plausible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandMultipliers {
    pub low: f64,
    pub high: f64,
}

impl BandMultipliers {
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether `price` falls inside the band anchored at `base`, inclusive.
    #[must_use]
    pub fn contains(&self, base: f64, price: f64) -> bool {
        price >= base * self.low && price <= base * self.high
    }
}
