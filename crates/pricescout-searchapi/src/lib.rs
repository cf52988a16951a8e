pub mod client;
pub mod error;
pub mod rate_limit;
pub mod raw;

pub use client::SearchApiClient;
pub use error::SearchApiError;
pub use rate_limit::RateLimiter;
pub use raw::{parse_price, RawSearchResult, SearchResponse};
