//! HTTP client for the shopping search provider.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::error::SearchApiError;
use crate::rate_limit::RateLimiter;
use crate::raw::{RawSearchResult, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://www.searchapi.io";

/// Client for the provider's Google Shopping engine.
///
/// Every call goes through the shared [`RateLimiter`]: requests are spaced
/// apart, and a 429 response opens a provider-wide cooldown before the typed
/// error is returned to the caller.
pub struct SearchApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    limiter: Arc<RateLimiter>,
}

impl SearchApiClient {
    /// Creates a client against the production provider endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SearchApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self, SearchApiError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, timeout_secs, user_agent, limiter)
    }

    /// Creates a client against a custom base URL. Tests point this at a
    /// local mock server.
    ///
    /// # Errors
    ///
    /// Returns [`SearchApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self, SearchApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            limiter,
        })
    }

    /// Runs one shopping search and flattens the provider response into a
    /// result list.
    ///
    /// # Errors
    ///
    /// - [`SearchApiError::RateLimited`] — HTTP 429; the shared cooldown
    ///   window is opened before this returns.
    /// - [`SearchApiError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`SearchApiError::Http`] — network failure or timeout.
    /// - [`SearchApiError::Deserialize`] — response body is not the expected JSON.
    pub async fn search(
        &self,
        query: &str,
        country_code: &str,
    ) -> Result<Vec<RawSearchResult>, SearchApiError> {
        let url = self.search_url(query, country_code)?;

        self.limiter.acquire().await;
        tracing::debug!(query, country_code, "searching shopping provider");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let cooldown = self.limiter.report_rate_limited().await;
            tracing::warn!(
                query,
                cooldown_secs = cooldown.as_secs(),
                "search provider rate limited"
            );
            return Err(SearchApiError::RateLimited {
                cooldown_secs: cooldown.as_secs(),
            });
        }

        if !status.is_success() {
            return Err(SearchApiError::UnexpectedStatus {
                status: status.as_u16(),
                query: query.to_owned(),
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<SearchResponse>(&body).map_err(|e| {
                SearchApiError::Deserialize {
                    context: format!("shopping results for \"{query}\""),
                    source: e,
                }
            })?;

        Ok(parsed.into_results())
    }

    /// Builds the provider URL for one query. The API key travels as a query
    /// parameter, so the built URL is never logged.
    fn search_url(&self, query: &str, country_code: &str) -> Result<String, SearchApiError> {
        let base = format!("{}/api/v1/search", self.base_url);
        let mut url =
            reqwest::Url::parse(&base).map_err(|e| SearchApiError::InvalidBaseUrl {
                url: base.clone(),
                reason: e.to_string(),
            })?;

        url.query_pairs_mut()
            .append_pair("engine", "google_shopping")
            .append_pair("q", query)
            .append_pair("gl", country_code)
            .append_pair("api_key", &self.api_key);

        Ok(url.to_string())
    }
}
