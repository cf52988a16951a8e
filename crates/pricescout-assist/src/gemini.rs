//! `generateContent` client for Google's Gemini API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use pricescout_core::{Comparison, ProductDescriptor};

use crate::error::AssistError;
use crate::parse::parse_comparison_array;
use crate::Assist;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model; overridable through configuration.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl GenerateResponse {
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
    }
}

/// Gemini-backed [`Assist`] implementation.
pub struct GeminiAssist {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiAssist {
    /// Creates a client against the production Gemini endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, AssistError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, model, timeout_secs)
    }

    /// Creates a client against a custom base URL. Tests point this at a
    /// local mock server.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, AssistError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }

    /// Sends one prompt and returns the first candidate's text, trimmed.
    /// Empty output (no candidates, empty text) is returned as `""`.
    async fn generate(&self, prompt: String) -> Result<String, AssistError> {
        let url = format!(
            "{}/v1/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssistError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.text().unwrap_or_default().trim().to_owned())
    }
}

#[async_trait]
impl Assist for GeminiAssist {
    async fn clean_title(&self, title: &str) -> Result<String, AssistError> {
        let cleaned = self.generate(clean_title_prompt(title)).await?;
        tracing::debug!(original = title, cleaned, "assist cleaned product title");
        Ok(cleaned)
    }

    async fn validate_comparisons(
        &self,
        descriptor: &ProductDescriptor,
        comparisons: &[Comparison],
    ) -> Result<Vec<Comparison>, AssistError> {
        let prompt = validate_prompt(descriptor, comparisons)?;
        let response = self.generate(prompt).await?;
        parse_comparison_array(&response)
    }
}

fn clean_title_prompt(title: &str) -> String {
    format!(
        r#"Clean this product title for better search results. Remove SEO words, marketing terms, and keep only the essential product information (brand, model, type). Return only the cleaned title, nothing else.

Original title: "{title}"

Examples:
- "Sonos Ace: Wireless Over Ear Headphones with Noise Cancellation" → "Sonos Ace Wireless Headphones"
- "Samsung BESPOKE Jet Bot AI+ Robot Vacuum Cleaner with Clean Station" → "Samsung BESPOKE Jet Bot Vacuum"
- "Apple iPhone 15 Pro Max 256GB Titanium - Latest Model with Advanced Camera" → "Apple iPhone 15 Pro Max"

Cleaned title:"#
    )
}

fn validate_prompt(
    descriptor: &ProductDescriptor,
    comparisons: &[Comparison],
) -> Result<String, AssistError> {
    let product = serde_json::to_string(descriptor)?;
    let list = serde_json::to_string(comparisons)?;
    Ok(format!(
        r"You are a product comparison filter. Given an original product and a list of product comparisons from different stores, return only the ones that truly match the original product (same model and condition). Also clean up image URLs and standardize pricing.

IMPORTANT: Return ONLY a valid JSON array, no markdown formatting, no explanations, no code blocks. Just the raw JSON array.

Original Product:
{product}

Comparisons:
{list}

Return ONLY a JSON array of cleaned and validated comparison products:"
    ))
}
