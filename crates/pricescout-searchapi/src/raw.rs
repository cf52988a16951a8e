//! Raw result shapes returned by the shopping search provider.
//!
//! Field coverage varies by result block (ads, organic shopping results,
//! knowledge-graph offers), so every field is optional and accessor methods
//! pick the first usable value in the provider's reliability order.

use regex::Regex;
use serde::Deserialize;

/// Price as the provider returns it: sometimes a bare number, sometimes
/// display text like `"€279.00"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichSnippet {
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// One shopping result as returned by the provider, before verification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<PriceField>,
    #[serde(default, rename = "priceText")]
    pub price_text: Option<String>,
    #[serde(default)]
    pub price_string: Option<String>,
    #[serde(default)]
    pub extracted_price: Option<f64>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub product_link: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub offers_link: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub rich_snippet: Option<RichSnippet>,
}

impl RawSearchResult {
    /// Best-effort price for this result.
    ///
    /// Rich-snippet extension strings win (most reliable for shopping ads),
    /// then the first present of `price`/`priceText`/`price_string` is
    /// parsed, then the provider's own `extracted_price`.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        if let Some(price) = self.extensions_price() {
            return Some(price);
        }

        if let Some(PriceField::Number(n)) = self.price {
            return Some(n);
        }

        let text = [
            match &self.price {
                Some(PriceField::Text(t)) => Some(t.as_str()),
                _ => None,
            },
            self.price_text.as_deref(),
            self.price_string.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|t| !t.trim().is_empty());

        match text {
            Some(t) => parse_price(t),
            None => self.extracted_price,
        }
    }

    /// First present link field, in the provider's reliability order.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        [
            &self.link,
            &self.product_link,
            &self.source_url,
            &self.url,
            &self.offers_link,
        ]
        .into_iter()
        .find_map(|field| field.as_deref().filter(|u| !u.is_empty()))
    }

    /// Seller or source attribution, if the provider included one.
    #[must_use]
    pub fn store(&self) -> Option<&str> {
        [&self.seller, &self.source]
            .into_iter()
            .find_map(|field| field.as_deref().filter(|s| !s.trim().is_empty()))
    }

    /// Thumbnail or full image URL, if present.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        [&self.thumbnail, &self.image]
            .into_iter()
            .find_map(|field| field.as_deref().filter(|s| !s.is_empty()))
    }

    /// Price found in the rich-snippet extension strings, e.g. `"€279.00"`
    /// inside `["€279.00", "Free shipping"]`.
    fn extensions_price(&self) -> Option<f64> {
        let snippet = self.rich_snippet.as_ref()?;
        // Matches €437.00 or € 437,00.
        let re = Regex::new(r"€\s?\d{1,3}(?:[.,]\d{2})?").expect("valid extensions price regex");
        snippet
            .extensions
            .iter()
            .find_map(|ext| re.find(ext))
            .and_then(|m| parse_price(m.as_str()))
    }
}

/// Provider response envelope for one shopping search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub shopping_ads: Vec<RawSearchResult>,
    #[serde(default)]
    pub shopping_results: Vec<RawSearchResult>,
    #[serde(default)]
    pub inline_shopping: Vec<RawSearchResult>,
    #[serde(default)]
    pub knowledge_graph: Option<KnowledgeGraph>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeGraph {
    #[serde(default)]
    pub offers: Vec<RawSearchResult>,
}

impl SearchResponse {
    /// Flattens the response into one result list: the first non-empty of
    /// the three shopping blocks, plus any knowledge-graph offers.
    #[must_use]
    pub fn into_results(self) -> Vec<RawSearchResult> {
        let mut results = if self.shopping_ads.is_empty() {
            if self.shopping_results.is_empty() {
                self.inline_shopping
            } else {
                self.shopping_results
            }
        } else {
            self.shopping_ads
        };

        if let Some(graph) = self.knowledge_graph {
            results.extend(graph.offers);
        }

        results
    }
}

/// Parse a price out of display text like `"€279.00"` or `"437,00 €"`.
///
/// Takes the first digit run with an optional `.`/`,` separator; a comma is
/// treated as the decimal point.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    let re = Regex::new(r"(\d{1,4}[.,]?\d{2})").expect("valid price regex");
    let captures = re.captures(text)?;
    captures.get(1)?.as_str().replace(',', ".").parse().ok()
}
