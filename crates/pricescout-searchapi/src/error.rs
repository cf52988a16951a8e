use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by search provider (cooling down {cooldown_secs}s)")]
    RateLimited { cooldown_secs: u64 },

    #[error("unexpected HTTP status {status} for query \"{query}\"")]
    UnexpectedStatus { status: u16, query: String },

    #[error("invalid search base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
