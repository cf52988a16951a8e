/// Map a country name (or 2-letter code) to the search provider's `gl`
/// localization parameter.
///
/// Unknown countries fall back to `"us"`.
#[must_use]
pub fn country_to_gl(country: &str) -> &'static str {
    match country.trim().to_lowercase().as_str() {
        "de" | "germany" => "de",
        "gb" | "uk" | "united kingdom" => "gb",
        "fr" | "france" => "fr",
        "it" | "italy" => "it",
        "es" | "spain" => "es",
        "nl" | "netherlands" => "nl",
        "be" | "belgium" => "be",
        "at" | "austria" => "at",
        "ch" | "switzerland" => "ch",
        "lt" | "lithuania" => "lt",
        "lv" | "latvia" => "lv",
        "ee" | "estonia" => "ee",
        "pl" | "poland" => "pl",
        "dk" | "denmark" => "dk",
        "no" | "norway" => "no",
        "fi" | "finland" => "fi",
        _ => "us",
    }
}
