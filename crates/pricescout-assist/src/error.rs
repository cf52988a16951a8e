use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("assist call returned status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not parse assist output: {reason}")]
    MalformedOutput { reason: String },
}
