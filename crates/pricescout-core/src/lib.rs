//! Shared types and configuration for the pricescout pipeline.
//!
//! Holds the product descriptor and comparison types exchanged between the
//! search, verification, and ranking stages, plus env-based configuration
//! and the country/retailer lookup tables.

pub mod app_config;
pub mod config;
pub mod countries;
pub mod error;
pub mod retailers;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use countries::country_to_gl;
pub use error::ConfigError;
pub use retailers::{load_retailers, RetailerDirectory};
pub use types::{Assessment, BandMultipliers, Comparison, ProductDescriptor};
