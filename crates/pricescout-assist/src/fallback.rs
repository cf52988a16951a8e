//! Deterministic title cleaning for when the assist service is unavailable.

use regex::Regex;

/// Shopping and marketing filler commonly padded onto retailer product
/// titles. Multi-word phrases come first so they win over their parts.
/// Category nouns and spec words (wireless, headphones, 256GB) stay: they
/// identify the product and removing them hurts search quality.
const STOP_WORDS: &[&str] = &[
    "free shipping",
    "best price",
    "with",
    "and",
    "the",
    "latest",
    "new",
    "best",
    "top",
    "premium",
    "advanced",
    "professional",
    "ultimate",
    "amazing",
    "incredible",
    "fantastic",
    "excellent",
    "perfect",
    "ideal",
    "superior",
    "stunning",
    "brilliant",
    "awesome",
    "great",
    "beautiful",
    "elegant",
    "stylish",
    "exclusive",
    "limited",
    "edition",
    "trending",
    "popular",
    "recommended",
    "certified",
    "authentic",
    "genuine",
    "official",
    "buy",
    "online",
    "shop",
    "sale",
    "discount",
    "cheap",
    "deal",
    "offer",
    "price",
    "clearance",
    "outlet",
    "bundle",
    "warranty",
    "guarantee",
    "refurbished",
    "kaufen",
    "bestellen",
    "günstig",
    "angebot",
    "rabatt",
];

/// Strips shopping filler from a product title without calling out to the
/// assist service.
///
/// Removal is case-insensitive on whole words; surviving words keep their
/// original casing. Whitespace is collapsed and leftover `:`/`-` edge
/// separators are trimmed.
#[must_use]
pub fn clean_title_fallback(title: &str) -> String {
    if title.trim().is_empty() {
        return String::new();
    }

    let stop_words = format!(r"(?i)\b(?:{})\b", STOP_WORDS.join("|"));
    let stop_words = Regex::new(&stop_words).expect("valid stop words regex");
    let stripped = stop_words.replace_all(title, "");

    let whitespace = Regex::new(r"\s+").expect("valid whitespace regex");
    let collapsed = whitespace.replace_all(&stripped, " ");

    let edges = Regex::new(r"^[:\-\s]+|[:\-\s]+$").expect("valid edge separators regex");
    edges.replace_all(collapsed.trim(), "").to_string()
}
