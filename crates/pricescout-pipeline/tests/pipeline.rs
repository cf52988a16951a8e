//! End-to-end pipeline tests.
//!
//! Three `wiremock` servers stand in for the world: the shopping search
//! provider, the retailer serving product pages, and (where used) the
//! assist endpoint. Each test drives `Orchestrator::run` and asserts on
//! the final comparison list.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricescout_assist::{GeminiAssist, GuardedAssist, DEFAULT_MODEL};
use pricescout_core::{ProductDescriptor, RetailerDirectory};
use pricescout_pipeline::{Orchestrator, PipelineSettings};
use pricescout_searchapi::{RateLimiter, SearchApiClient};
use pricescout_verify::Validator;

const TEST_AGENT: &str = "pricescout-test/0.1";

fn search_client(base_url: &str) -> SearchApiClient {
    let limiter = Arc::new(RateLimiter::new(Duration::ZERO, Duration::ZERO));
    SearchApiClient::with_base_url(base_url, "test-key", 5, TEST_AGENT, limiter)
        .expect("failed to build test SearchApiClient")
}

/// Pipeline without an assist client.
fn pipeline(search_base: &str) -> Orchestrator<GeminiAssist> {
    Orchestrator::new(
        search_client(search_base),
        Validator::new(5, TEST_AGENT).expect("failed to build test Validator"),
        RetailerDirectory::builtin(),
        None,
        PipelineSettings::default(),
    )
}

/// The product the user is holding: €300 reference price, model known.
fn descriptor() -> ProductDescriptor {
    ProductDescriptor {
        title: "Sonos Ace Wireless Headphones".to_string(),
        model: Some("ACE1BLK".to_string()),
        brand: Some("Sonos".to_string()),
        price: Some(300.0),
        currency: "€".to_string(),
        country: "Germany".to_string(),
    }
}

/// Same product described by title alone; generates exactly two queries.
fn title_only_descriptor() -> ProductDescriptor {
    ProductDescriptor {
        title: "Sonos Ace".to_string(),
        model: None,
        brand: None,
        price: Some(300.0),
        currency: "€".to_string(),
        country: "Germany".to_string(),
    }
}

/// A retailer page that passes every content gate.
fn product_page(title: &str, price_markup: &str) -> String {
    format!(
        r#"<html><head><title>{title}</title>
<meta property="og:image" content="https://cdn.shop.test/ace-hero.jpg"></head>
<body><h1>{title}</h1><button>Add to cart</button>
<span>{price_markup}</span><p>Free shipping and delivery, in stock.</p></body></html>"#
    )
}

/// Wraps model output text in the assist response envelope.
fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "parts": [{ "text": text }] } }
        ]
    })
}

// ---------------------------------------------------------------------------
// Test 1 – full run: relevance gate, live verification, band, ranking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn finds_and_ranks_comparisons_end_to_end() {
    let search = MockServer::start().await;
    let retailer = MockServer::start().await;

    // Three relevant results (so one query suffices) plus one unrelated
    // accessory result the relevance gate must drop unfetched.
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "shopping_results": [
                {
                    "title": "Sonos Ace Wireless Headphones",
                    "price": "€299.00",
                    "link": format!("{}/dp/B0ABC123", retailer.uri()),
                    "seller": "amazon.de"
                },
                {
                    "title": "Sonos Ace Kopfhörer",
                    "price": "€259.00",
                    "link": format!("{}/product/ace", retailer.uri()),
                    "seller": "othershop.example"
                },
                {
                    "title": "Sonos Ace Carrying Case",
                    "price": "€25.00",
                    "link": format!("{}/product/case", retailer.uri()),
                    "seller": "casestore.example"
                },
                {
                    "title": "USB-C cable 2m braided",
                    "price": "€9.99",
                    "link": format!("{}/product/cable", retailer.uri()),
                    "seller": "cables.example"
                }
            ]
        })))
        .expect(1)
        .mount(&search)
        .await;

    Mock::given(method("GET"))
        .and(path("/dp/B0ABC123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("Sonos Ace ANC Headphones", "€ 279,00")),
        )
        .expect(1)
        .mount(&retailer)
        .await;
    Mock::given(method("GET"))
        .and(path("/product/ace"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("Sonos Ace Kopfhörer Schwarz", "€ 259,00")),
        )
        .expect(1)
        .mount(&retailer)
        .await;
    Mock::given(method("GET"))
        .and(path("/product/case"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("Sonos Ace Carrying Case", "€ 25,00")),
        )
        .expect(1)
        .mount(&retailer)
        .await;

    let comparisons = pipeline(&search.uri()).run(&descriptor()).await;

    // The €25 case passed page verification but fell outside the price
    // band; the cable never reached verification at all.
    assert_eq!(comparisons.len(), 2, "got: {comparisons:?}");

    // amazon.de is a German local retailer, so it outranks the cheaper
    // foreign offer.
    assert_eq!(comparisons[0].store, "amazon.de");
    assert_eq!(comparisons[0].price, 279.0, "live page price must win");
    assert_eq!(comparisons[0].title, "Sonos Ace ANC Headphones");
    assert_eq!(
        comparisons[0].image.as_deref(),
        Some("https://cdn.shop.test/ace-hero.jpg")
    );
    assert_eq!(comparisons[0].url, format!("{}/dp/B0ABC123", retailer.uri()));
    let a = &comparisons[0].assessment;
    assert_eq!((a.cost, a.value, a.quality), (2, 2, 2));
    assert_eq!(a.description, "Found on amazon.de");

    assert_eq!(comparisons[1].store, "othershop.example");
    assert_eq!(comparisons[1].price, 259.0);
    // 259 is more than 10% below the original 300.
    assert_eq!(comparisons[1].assessment.cost, 1);
    assert_eq!(comparisons[1].assessment.value, 3);
}

// ---------------------------------------------------------------------------
// Test 2 – relevant results accumulate across queries before stopping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn accumulates_relevant_results_across_queries() {
    let search = MockServer::start().await;
    let retailer = MockServer::start().await;

    // Two relevant results per query: not enough after one query, enough
    // after two. The duplicates collapse before verification.
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "shopping_results": [
                {
                    "title": "Sonos Ace Black",
                    "price": "€279.00",
                    "link": format!("{}/dp/B0AAA111", retailer.uri()),
                    "seller": "amazon.de"
                },
                {
                    "title": "Sonos Ace White",
                    "price": "€289.00",
                    "link": format!("{}/dp/B0BBB222", retailer.uri()),
                    "seller": "mediamarkt.de"
                }
            ]
        })))
        .expect(2)
        .mount(&search)
        .await;

    Mock::given(method("GET"))
        .and(path("/dp/B0AAA111"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("Sonos Ace Black", "€ 279,00")),
        )
        .expect(1)
        .mount(&retailer)
        .await;
    Mock::given(method("GET"))
        .and(path("/dp/B0BBB222"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("Sonos Ace White", "€ 289,00")),
        )
        .expect(1)
        .mount(&retailer)
        .await;

    let comparisons = pipeline(&search.uri()).run(&title_only_descriptor()).await;

    assert_eq!(comparisons.len(), 2, "got: {comparisons:?}");
    assert_eq!(comparisons[0].price, 279.0);
    assert_eq!(comparisons[1].price, 289.0);
}

// ---------------------------------------------------------------------------
// Test 3 – a rate-limited provider aborts the run with no comparisons
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limited_run_returns_nothing() {
    let search = MockServer::start().await;

    // The first 429 must abort the loop: one call, not one per query.
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&search)
        .await;

    let comparisons = pipeline(&search.uri()).run(&title_only_descriptor()).await;

    assert!(comparisons.is_empty(), "got: {comparisons:?}");
}

// ---------------------------------------------------------------------------
// Test 4 – a failing provider exhausts every query, then yields nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn provider_failure_returns_nothing() {
    let search = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&search)
        .await;

    let comparisons = pipeline(&search.uri()).run(&title_only_descriptor()).await;

    assert!(comparisons.is_empty(), "got: {comparisons:?}");
}

// ---------------------------------------------------------------------------
// Test 5 – results whose pages are dead verify to nothing, not to filler
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dead_retailer_page_drops_the_result() {
    let search = MockServer::start().await;
    let retailer = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "shopping_results": [
                {
                    "title": "Sonos Ace Black",
                    "price": "€279.00",
                    "link": format!("{}/dp/B0DEAD000", retailer.uri()),
                    "seller": "amazon.de"
                }
            ]
        })))
        .expect(2)
        .mount(&search)
        .await;

    // The same result arrives from both queries but is fetched once.
    Mock::given(method("GET"))
        .and(path("/dp/B0DEAD000"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&retailer)
        .await;

    let comparisons = pipeline(&search.uri()).run(&title_only_descriptor()).await;

    assert!(comparisons.is_empty(), "got: {comparisons:?}");
}

// ---------------------------------------------------------------------------
// Test 6 – Google Shopping listings flow through without page fetches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn google_shopping_listings_skip_page_fetches() {
    let search = MockServer::start().await;

    // No retailer server exists; any fetch attempt would drop the result.
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "shopping_results": [
                {
                    "title": "Sonos Ace Wireless Headphones",
                    "price": "€289.00",
                    "link": "https://www.google.com/shopping/product/111?gl=de",
                    "thumbnail": "https://encrypted-tbn0.gstatic.com/shopping?q=a"
                },
                {
                    "title": "Sonos Ace Wireless Headphones - White",
                    "price": "€310.00",
                    "link": "https://www.google.com/shopping/product/222?gl=de"
                },
                {
                    "title": "Sonos Ace ANC Headphones",
                    "price": "€290.00",
                    "link": "https://www.google.com/shopping/product/333?gl=de"
                }
            ]
        })))
        .expect(1)
        .mount(&search)
        .await;

    let comparisons = pipeline(&search.uri()).run(&descriptor()).await;

    assert_eq!(comparisons.len(), 3, "got: {comparisons:?}");
    assert!(comparisons
        .iter()
        .all(|c| c.store == "Google Shopping" && c.url.contains("google.com/shopping/product/")));
    // Ranked by price: no local stores among them.
    let prices: Vec<f64> = comparisons.iter().map(|c| c.price).collect();
    assert_eq!(prices, [289.0, 290.0, 310.0]);
}

// ---------------------------------------------------------------------------
// Test 7 – the assist pass prunes the final list when configured
// ---------------------------------------------------------------------------

#[tokio::test]
async fn assist_validation_prunes_comparisons() {
    let search = MockServer::start().await;
    let retailer = MockServer::start().await;
    let gemini = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "shopping_results": [
                {
                    "title": "Sonos Ace Wireless Headphones",
                    "price": "€289.00",
                    "link": "https://www.google.com/shopping/product/987?gl=de",
                    "thumbnail": "https://encrypted-tbn0.gstatic.com/shopping?q=xyz"
                },
                {
                    "title": "Sonos Ace Black",
                    "price": "€279.00",
                    "link": format!("{}/dp/B0ABC123", retailer.uri()),
                    "seller": "amazon.de"
                },
                {
                    "title": "Sonos Ace Kopfhörer",
                    "price": "€259.00",
                    "link": format!("{}/product/ace", retailer.uri()),
                    "seller": "othershop.example"
                }
            ]
        })))
        .expect(1)
        .mount(&search)
        .await;

    Mock::given(method("GET"))
        .and(path("/dp/B0ABC123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("Sonos Ace Black", "€ 279,00")),
        )
        .mount(&retailer)
        .await;
    Mock::given(method("GET"))
        .and(path("/product/ace"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("Sonos Ace Kopfhörer", "€ 259,00")),
        )
        .mount(&retailer)
        .await;

    // Title cleaning leaves the title as is; validation keeps only the
    // Google Shopping offer.
    Mock::given(method("POST"))
        .and(body_string_contains("Original title:"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&gemini_reply("Sonos Ace Wireless Headphones")),
        )
        .expect(1)
        .mount(&gemini)
        .await;
    let kept = json!([{
        "title": "Sonos Ace Wireless Headphones",
        "store": "Google Shopping",
        "price": 289.0,
        "currency": "€",
        "url": "https://www.google.com/shopping/product/987?gl=de",
        "image": "https://encrypted-tbn0.gstatic.com/shopping?q=xyz",
        "condition": "New",
        "assessment": {
            "cost": 2,
            "value": 2,
            "quality": 2,
            "description": "Found on Google Shopping"
        }
    }]);
    Mock::given(method("POST"))
        .and(body_string_contains("product comparison filter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&gemini_reply(&kept.to_string())))
        .expect(1)
        .mount(&gemini)
        .await;

    let assist = GeminiAssist::with_base_url(&gemini.uri(), "test-key", DEFAULT_MODEL, 5)
        .expect("failed to build test GeminiAssist");
    let orchestrator = Orchestrator::new(
        search_client(&search.uri()),
        Validator::new(5, TEST_AGENT).expect("failed to build test Validator"),
        RetailerDirectory::builtin(),
        Some(GuardedAssist::new(assist, 3)),
        PipelineSettings::default(),
    );

    let comparisons = orchestrator.run(&descriptor()).await;

    assert_eq!(comparisons.len(), 1, "got: {comparisons:?}");
    assert_eq!(comparisons[0].store, "Google Shopping");
    assert_eq!(
        comparisons[0].url,
        "https://www.google.com/shopping/product/987?gl=de"
    );
}
