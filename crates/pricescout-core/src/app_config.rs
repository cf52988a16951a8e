use std::path::PathBuf;

use crate::types::BandMultipliers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub search_api_key: String,
    pub assist_api_key: Option<String>,
    pub env: Environment,
    pub log_level: String,
    pub retailers_path: Option<PathBuf>,
    pub user_agent: String,
    pub search_timeout_secs: u64,
    pub search_min_interval_ms: u64,
    pub search_cooldown_secs: u64,
    pub page_timeout_secs: u64,
    pub early_stop_target: usize,
    pub max_comparisons: usize,
    pub default_band: BandMultipliers,
    pub shopping_band: BandMultipliers,
    pub assist_model: String,
    pub assist_timeout_secs: u64,
    pub assist_failure_threshold: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("search_api_key", &"[redacted]")
            .field(
                "assist_api_key",
                &self.assist_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("retailers_path", &self.retailers_path)
            .field("user_agent", &self.user_agent)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("search_min_interval_ms", &self.search_min_interval_ms)
            .field("search_cooldown_secs", &self.search_cooldown_secs)
            .field("page_timeout_secs", &self.page_timeout_secs)
            .field("early_stop_target", &self.early_stop_target)
            .field("max_comparisons", &self.max_comparisons)
            .field("default_band", &self.default_band)
            .field("shopping_band", &self.shopping_band)
            .field("assist_model", &self.assist_model)
            .field("assist_timeout_secs", &self.assist_timeout_secs)
            .field("assist_failure_threshold", &self.assist_failure_threshold)
            .finish()
    }
}
