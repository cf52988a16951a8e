//! Turns raw shopping-search results into verified price comparisons.
//!
//! Google Shopping product links are trusted as-is (they 404 when fetched
//! directly); every other URL is fetched and its HTML inspected for real
//! product content before a comparison is built from the live page.

pub mod assess;
pub mod error;
pub mod extract;
pub mod page;
pub mod validator;

pub use assess::build_assessment;
pub use error::VerifyError;
pub use extract::{direct_retailer_url, is_google_shopping_url, is_product_url, store_name};
pub use page::is_valid_product_page;
pub use validator::Validator;
