//! Deliberately lenient filter over raw search results.
//!
//! Anything that shares a model number, a brand, or enough title words with
//! the product passes. Precision comes later from page verification and the
//! price band, not from this gate.

use pricescout_core::ProductDescriptor;
use pricescout_searchapi::RawSearchResult;

use crate::queries::extract_brand;

/// Minimum overlapping significant words, before the 40% rule kicks in.
const MIN_WORD_MATCHES: usize = 2;

/// Whether a raw result plausibly refers to the product.
///
/// `title` is the effective search title, i.e. the cleaned one when
/// cleaning produced anything.
#[must_use]
pub fn is_relevant(raw: &RawSearchResult, descriptor: &ProductDescriptor, title: &str) -> bool {
    let result_title = raw.title.as_deref().unwrap_or_default().to_lowercase();
    if result_title.is_empty() {
        return false;
    }

    if has_model_match(&result_title, descriptor.model.as_deref()) {
        return true;
    }

    let brand = descriptor
        .brand
        .as_deref()
        .map(str::trim)
        .filter(|brand| !brand.is_empty())
        .map(str::to_owned)
        .or_else(|| extract_brand(title));
    if has_brand_match(&result_title, brand.as_deref()) {
        return true;
    }

    let title_lower = title.to_lowercase();
    let title_words: Vec<&str> = significant_words(&title_lower).collect();
    let result_words: Vec<&str> = significant_words(&result_title).collect();
    let matches = count_word_overlap(&title_words, &result_words);
    let required = (title_words.len() * 2 / 5).max(MIN_WORD_MATCHES);
    matches >= required
}

/// Case-insensitive model-number containment in the result title.
#[must_use]
pub fn has_model_match(result_title_lower: &str, model: Option<&str>) -> bool {
    model
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .is_some_and(|model| result_title_lower.contains(&model.to_lowercase()))
}

/// Case-insensitive brand containment in the result title.
#[must_use]
pub fn has_brand_match(result_title_lower: &str, brand: Option<&str>) -> bool {
    brand
        .map(str::trim)
        .filter(|brand| !brand.is_empty())
        .is_some_and(|brand| result_title_lower.contains(&brand.to_lowercase()))
}

/// Counts title words appearing in the result words, matching by substring
/// in either direction so "headphone" and "headphones" overlap.
#[must_use]
pub fn count_word_overlap(title_words: &[&str], result_words: &[&str]) -> usize {
    title_words
        .iter()
        .filter(|&&word| {
            result_words
                .iter()
                .any(|&result_word| result_word.contains(word) || word.contains(result_word))
        })
        .count()
}

fn significant_words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace().filter(|word| word.len() > 2)
}
