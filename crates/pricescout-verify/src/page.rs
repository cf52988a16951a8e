//! Heuristics that decide whether fetched HTML is a live product page.

/// Phrases that mark a page as an error, a redirect stub, or a dead listing.
const ERROR_INDICATORS: &[&str] = &[
    "page not found",
    "404",
    "not found",
    "error",
    "sorry",
    "unavailable",
    "out of stock",
    "discontinued",
    "click the button below to continue shopping",
];

/// Phrases expected on a real product page. A page must contain several of
/// these before it is trusted.
const PRODUCT_INDICATORS: &[&str] = &[
    "add to cart",
    "buy now",
    "add to basket",
    "purchase",
    "price",
    "€",
    "$",
    "product",
    "item",
    "shipping",
    "delivery",
    "stock",
    "availability",
];

const MIN_PRODUCT_INDICATORS: usize = 3;

/// Checks fetched HTML against three gates: no error phrases, enough
/// product phrases, and enough overlap with the expected product title.
///
/// Title matching only considers words longer than two characters and
/// requires at least 30% of them (minimum one) to appear in the page.
pub fn is_valid_product_page(html: &str, expected_title: &str) -> bool {
    let page = html.to_lowercase();

    if ERROR_INDICATORS.iter().any(|phrase| page.contains(phrase)) {
        return false;
    }

    let found = PRODUCT_INDICATORS
        .iter()
        .filter(|phrase| page.contains(*phrase))
        .count();
    if found < MIN_PRODUCT_INDICATORS {
        return false;
    }

    let title_words: Vec<String> = expected_title
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.len() > 2)
        .map(str::to_string)
        .collect();
    let matching = title_words
        .iter()
        .filter(|word| page.contains(word.as_str()))
        .count();

    // Integer form of `matching >= max(1, 0.3 * word count)`.
    let required = (title_words.len() * 3).div_ceil(10).max(1);
    matching >= required
}
