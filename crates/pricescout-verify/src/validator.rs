//! Per-result verification: fetch the product page and rebuild the
//! comparison from what is actually live on it.

use std::time::Duration;

use pricescout_core::{Comparison, ProductDescriptor};
use pricescout_searchapi::RawSearchResult;

use crate::assess::build_assessment;
use crate::error::VerifyError;
use crate::extract::{
    direct_retailer_url, is_google_shopping_url, is_product_url, page_image, page_price,
    page_title, store_name,
};
use crate::page::is_valid_product_page;

/// Turns one raw search result into a verified [`Comparison`], or a typed
/// reason it was dropped.
///
/// Verification fetches the candidate URL and trusts the live page over the
/// search result: page title, page price, and page image override what the
/// provider reported. Google Shopping listings are the exception since they
/// 404 outside a browser; those are accepted on the provider's data alone.
pub struct Validator {
    client: reqwest::Client,
}

impl Validator {
    /// Builds the page-fetching client.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(page_timeout_secs: u64, user_agent: &str) -> Result<Self, VerifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(page_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Verifies one raw result against the descriptor it was found for.
    ///
    /// # Errors
    ///
    /// - [`VerifyError::MissingPriceOrUrl`] — no positive price or no link.
    /// - [`VerifyError::NotProductShaped`] — the link is a storefront or
    ///   category page, not a product page.
    /// - [`VerifyError::UnexpectedStatus`] — the page fetch returned non-2xx.
    /// - [`VerifyError::PageRejected`] — the page content failed the
    ///   product checks.
    /// - [`VerifyError::Http`] — network failure or timeout while fetching.
    pub async fn validate(
        &self,
        raw: &RawSearchResult,
        descriptor: &ProductDescriptor,
    ) -> Result<Comparison, VerifyError> {
        let price = raw.price().filter(|price| *price > 0.0);
        let (Some(price), Some(link)) = (price, raw.url()) else {
            return Err(VerifyError::MissingPriceOrUrl {
                title: raw.title.clone().unwrap_or_default(),
            });
        };

        let url = direct_retailer_url(link);
        if !is_product_url(&url) {
            return Err(VerifyError::NotProductShaped { url });
        }

        let store = store_name(raw.store(), &url);
        let currency = raw
            .currency
            .clone()
            .filter(|currency| !currency.is_empty())
            .unwrap_or_else(|| descriptor.currency.clone());

        // Google Shopping product pages 404 when fetched directly, so the
        // listing is trusted as-is.
        if is_google_shopping_url(&url) {
            tracing::debug!(url, "accepting shopping listing without page fetch");
            let assessment = build_assessment(price, descriptor.price, &store);
            return Ok(Comparison {
                title: raw
                    .title
                    .clone()
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| "Unknown Product".to_string()),
                store,
                price,
                currency,
                url,
                image: raw.image_url().map(str::to_string),
                condition: "New".to_string(),
                assessment,
            });
        }

        tracing::debug!(url, "fetching product page for verification");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(VerifyError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }
        let html = response.text().await?;

        if !is_valid_product_page(&html, &descriptor.title) {
            return Err(VerifyError::PageRejected { url });
        }

        // The live page wins over the search result wherever it has data.
        let title = page_title(&html)
            .or_else(|| raw.title.clone().filter(|title| !title.is_empty()))
            .unwrap_or_else(|| descriptor.title.clone());
        let final_price = page_price(&html).unwrap_or(price);
        let image = page_image(&html, &url).or_else(|| raw.image_url().map(str::to_string));

        let assessment = build_assessment(final_price, descriptor.price, &store);
        Ok(Comparison {
            title,
            store,
            price: final_price,
            currency,
            url,
            image,
            condition: "New".to_string(),
            assessment,
        })
    }
}
