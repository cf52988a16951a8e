//! URL shaping, store attribution, and live-page field extraction.

use regex::Regex;

/// Google Shopping product links 404 when fetched outside a browser, so they
/// bypass page validation and are kept verbatim.
pub const GOOGLE_SHOPPING_MARKER: &str = "google.com/shopping/product/";

/// Path fragments that mark a URL as pointing at a single product rather
/// than a storefront, category, or search page.
const PRODUCT_PATH_MARKERS: &[&str] = &["/product/", "/p/", "/dp/", "/item/", "/shop/"];

#[must_use]
pub fn is_google_shopping_url(url: &str) -> bool {
    url.contains(GOOGLE_SHOPPING_MARKER)
}

/// Strips query strings and fragments from a result link, keeping only
/// scheme, host, and path. Google Shopping links and unparseable strings
/// pass through unchanged.
#[must_use]
pub fn direct_retailer_url(link: &str) -> String {
    if is_google_shopping_url(link) {
        return link.to_string();
    }
    reqwest::Url::parse(link).map_or_else(
        |_| link.to_string(),
        |url| format!("{}{}", url.origin().ascii_serialization(), url.path()),
    )
}

/// Whether a normalized URL plausibly points at a single product page.
///
/// Bare domains and short URLs are rejected; everything else must carry one
/// of the usual product path markers. Google Shopping links always qualify.
#[must_use]
pub fn is_product_url(url: &str) -> bool {
    if is_google_shopping_url(url) {
        return true;
    }
    if url.len() <= 20 {
        return false;
    }
    let bare_domain = Regex::new(r"^https?://[^/]+/?$").expect("valid bare domain regex");
    if bare_domain.is_match(url) {
        return false;
    }
    PRODUCT_PATH_MARKERS.iter().any(|marker| url.contains(marker))
}

/// Picks a display name for the store behind a comparison.
///
/// Seller attribution from the search result wins when present; otherwise
/// the URL decides: Google Shopping links get a fixed label, anything else
/// falls back to the hostname without its `www.` prefix.
#[must_use]
pub fn store_name(attribution: Option<&str>, url: &str) -> String {
    if let Some(name) = attribution {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }
    if is_google_shopping_url(url) {
        return "Google Shopping".to_string();
    }
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|host| host.replacen("www.", "", 1)))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Extracts the `<title>` text from fetched HTML.
#[must_use]
pub fn page_title(html: &str) -> Option<String> {
    let re = Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("valid title regex");
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Extracts a price from fetched HTML.
///
/// Patterns are tried in order and the first one that matches decides the
/// outcome: its captured amount is parsed (comma accepted as the decimal
/// separator) and must be positive, otherwise no price is reported.
#[must_use]
pub fn page_price(html: &str) -> Option<f64> {
    let patterns = [
        r"(?i)€\s*(\d+[.,]\d{2})",
        r"(?i)\$(\d+[.,]\d{2})",
        r"(?i)(\d+[.,]\d{2})\s*€",
        r"(?i)(\d+[.,]\d{2})\s*\$",
        r"(?i)price[^>]*>.*?(\d+[.,]\d{2})",
        r"(?i)cost[^>]*>.*?(\d+[.,]\d{2})",
    ];
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid page price regex");
        if let Some(cap) = re.captures(html) {
            return cap
                .get(1)
                .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
                .filter(|price| *price > 0.0);
        }
    }
    None
}

/// Extracts a product image URL from fetched HTML.
///
/// Prefers Open Graph and Twitter card metadata over `<img>` tags.
/// Protocol-relative results are pinned to https and root-relative paths
/// are resolved against the fetched page's origin.
#[must_use]
pub fn page_image(html: &str, page_url: &str) -> Option<String> {
    let patterns = [
        r#"(?i)<meta[^>]*property="og:image"[^>]*content="([^"]+)""#,
        r#"(?i)<meta[^>]*name="twitter:image"[^>]*content="([^"]+)""#,
        r#"(?i)<img[^>]*src="([^"]*product[^"]*)"[^>]*>"#,
        r#"(?i)<img[^>]*src="([^"]*\.(?:jpg|jpeg|png|webp))"[^>]*>"#,
    ];
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid page image regex");
        if let Some(image) = re.captures(html).and_then(|cap| cap.get(1)) {
            let image = image.as_str();
            if image.is_empty() {
                continue;
            }
            return Some(resolve_image_url(image, page_url));
        }
    }
    None
}

fn resolve_image_url(image: &str, page_url: &str) -> String {
    if image.starts_with("//") {
        return format!("https:{image}");
    }
    if image.starts_with('/') {
        let origin = reqwest::Url::parse(page_url)
            .map(|u| u.origin().ascii_serialization())
            .unwrap_or_default();
        return format!("{origin}{image}");
    }
    image.to_string()
}
