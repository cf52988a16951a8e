//! Search query generation, from most to least specific.

use pricescout_core::ProductDescriptor;

/// Brand names recognized in product titles, scanned in order. Multi-word
/// entries must come before any single-word prefix of themselves.
const BRANDS: &[&str] = &[
    "Harman Kardon",
    "Bowers & Wilkins",
    "Cambridge Audio",
    "Audio-Technica",
    "Western Digital",
    "Monitor Audio",
    "Q Acoustics",
    "Polk Audio",
    "Samsung",
    "Sonos",
    "Bose",
    "Sony",
    "Apple",
    "Philips",
    "Panasonic",
    "Sennheiser",
    "Beyerdynamic",
    "JBL",
    "Shure",
    "AKG",
    "Denon",
    "Marantz",
    "Pioneer",
    "Onkyo",
    "Yamaha",
    "Klipsch",
    "Focal",
    "KEF",
    "Dali",
    "Dynaudio",
    "Elac",
    "Wharfedale",
    "Naim",
    "Linn",
    "McIntosh",
    "Bosch",
    "Siemens",
    "Beko",
    "Whirlpool",
    "Electrolux",
    "Sharp",
    "Toshiba",
    "Hitachi",
    "Haier",
    "Braun",
    "KitchenAid",
    "Miele",
    "Gorenje",
    "Grundig",
    "Zanussi",
    "Hotpoint",
    "Dell",
    "Lenovo",
    "Asus",
    "Acer",
    "Gigabyte",
    "Intel",
    "NVIDIA",
    "Corsair",
    "Logitech",
    "Razer",
    "SteelSeries",
    "HyperX",
    "Kingston",
    "Crucial",
    "Seagate",
    "Nintendo",
    "Microsoft",
    "PlayStation",
    "Xbox",
];

/// Product categories recognized in titles, all lowercase.
const PRODUCT_TYPES: &[&str] = &[
    "headphones",
    "headphone",
    "earbuds",
    "earphones",
    "speakers",
    "speaker",
    "subwoofer",
    "amplifier",
    "receiver",
    "turntable",
    "record player",
    "cd player",
    "streamer",
    "dac",
    "soundbar",
    "dishwasher",
    "washing machine",
    "dryer",
    "refrigerator",
    "freezer",
    "oven",
    "microwave",
    "vacuum cleaner",
    "air conditioner",
    "coffee maker",
    "toaster",
    "kettle",
    "laptop",
    "computer",
    "desktop",
    "tablet",
    "smartphone",
    "phone",
    "television",
    "monitor",
    "camera",
    "printer",
    "router",
    "keyboard",
    "mouse",
    "watch",
];

/// Which generation rule produced a query. Carried for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStrategy {
    ModelExact,
    ModelBrand,
    ModelType,
    TitleExact,
    TitleLoose,
    BrandWords,
    RawTitleExact,
    RawTitleLoose,
}

/// One generated provider query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub strategy: QueryStrategy,
}

/// Builds the ordered query list for a product.
///
/// Model-number queries lead because they are the most precise, then
/// cleaned-title queries, then a brand-plus-keywords form. The raw title is
/// used only when nothing else produced a query. Duplicate query strings
/// are dropped, first occurrence wins.
#[must_use]
pub fn build_queries(descriptor: &ProductDescriptor, cleaned_title: &str) -> Vec<SearchQuery> {
    let mut queries: Vec<SearchQuery> = Vec::new();
    let cleaned_title = cleaned_title.trim();

    let model = descriptor
        .model
        .as_deref()
        .map(str::trim)
        .filter(|model| !model.is_empty());
    if let Some(model) = model {
        push_unique(&mut queries, format!("\"{model}\""), QueryStrategy::ModelExact);
        let brand = descriptor
            .brand
            .as_deref()
            .map(str::trim)
            .filter(|brand| !brand.is_empty())
            .map(str::to_owned)
            .or_else(|| extract_brand(cleaned_title));
        if let Some(brand) = brand {
            push_unique(
                &mut queries,
                format!("\"{model}\" {brand}"),
                QueryStrategy::ModelBrand,
            );
        }
        if let Some(product_type) = extract_product_type(cleaned_title) {
            push_unique(
                &mut queries,
                format!("\"{model}\" {product_type}"),
                QueryStrategy::ModelType,
            );
        }
    }

    if !cleaned_title.is_empty() {
        push_unique(
            &mut queries,
            format!("\"{cleaned_title}\""),
            QueryStrategy::TitleExact,
        );
        push_unique(&mut queries, cleaned_title.to_owned(), QueryStrategy::TitleLoose);

        if let Some(brand) = extract_brand(cleaned_title) {
            let words: Vec<&str> = cleaned_title
                .split(' ')
                .filter(|word| word.len() > 2)
                .collect();
            if words.len() > 1 {
                // Two significant words after the leading brand token.
                let tail = words[1..words.len().min(3)].join(" ");
                push_unique(
                    &mut queries,
                    format!("{brand} {tail}"),
                    QueryStrategy::BrandWords,
                );
            }
        }
    }

    if queries.is_empty() {
        let title = descriptor.title.trim();
        if !title.is_empty() {
            push_unique(
                &mut queries,
                format!("\"{title}\""),
                QueryStrategy::RawTitleExact,
            );
            push_unique(&mut queries, title.to_owned(), QueryStrategy::RawTitleLoose);
        }
    }

    queries
}

fn push_unique(queries: &mut Vec<SearchQuery>, text: String, strategy: QueryStrategy) {
    if queries.iter().any(|query| query.text == text) {
        return;
    }
    queries.push(SearchQuery { text, strategy });
}

/// Finds a brand in the title: known vocabulary first (returned in its
/// canonical casing), else a capitalized leading token of plausible length.
#[must_use]
pub fn extract_brand(title: &str) -> Option<String> {
    let title_lower = title.to_lowercase();
    for brand in BRANDS {
        if title_lower.contains(&brand.to_lowercase()) {
            return Some((*brand).to_owned());
        }
    }

    let first = title.split_whitespace().next()?;
    (first.len() > 2 && first.len() < 15 && first.starts_with(|c: char| c.is_ascii_uppercase()))
        .then(|| first.to_owned())
}

/// Finds the product category named in the title. The longest vocabulary
/// hit wins, so "headphones" beats the "phone" contained in it.
#[must_use]
pub fn extract_product_type(title: &str) -> Option<&'static str> {
    let title_lower = title.to_lowercase();
    PRODUCT_TYPES
        .iter()
        .filter(|product_type| title_lower.contains(*product_type))
        .max_by_key(|product_type| product_type.len())
        .copied()
}
