use thiserror::Error;

/// Reasons a raw search result fails verification.
///
/// These are per-result outcomes, not pipeline failures: the caller drops
/// the result and moves on to the next one.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("result \"{title}\" has no usable price or url")]
    MissingPriceOrUrl { title: String },

    #[error("url does not look like a product page: {url}")]
    NotProductShaped { url: String },

    #[error("page fetch returned status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("page content failed product checks: {url}")]
    PageRejected { url: String },
}
