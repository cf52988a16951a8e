use crate::app_config::{AppConfig, Environment};
use crate::types::BandMultipliers;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let search_api_key = require("SEARCH_API_KEY")?;
    let assist_api_key = lookup("GEMINI_API_KEY").ok();

    let env = parse_environment(&or_default("PRICESCOUT_ENV", "development"));
    let log_level = or_default("PRICESCOUT_LOG_LEVEL", "info");
    let retailers_path = lookup("PRICESCOUT_RETAILERS_PATH").ok().map(PathBuf::from);

    let user_agent = or_default(
        "PRICESCOUT_USER_AGENT",
        "Mozilla/5.0 (compatible; PriceComparisonBot/1.0)",
    );
    let search_timeout_secs = parse_u64("PRICESCOUT_SEARCH_TIMEOUT_SECS", "15")?;
    let search_min_interval_ms = parse_u64("PRICESCOUT_SEARCH_MIN_INTERVAL_MS", "1000")?;
    let search_cooldown_secs = parse_u64("PRICESCOUT_SEARCH_COOLDOWN_SECS", "30")?;
    let page_timeout_secs = parse_u64("PRICESCOUT_PAGE_TIMEOUT_SECS", "10")?;
    let early_stop_target = parse_usize("PRICESCOUT_EARLY_STOP_TARGET", "3")?;
    let max_comparisons = parse_usize("PRICESCOUT_MAX_COMPARISONS", "10")?;

    let default_band = BandMultipliers::new(
        parse_f64("PRICESCOUT_PRICE_BAND_LOW", "0.4")?,
        parse_f64("PRICESCOUT_PRICE_BAND_HIGH", "2.0")?,
    );
    let shopping_band = BandMultipliers::new(
        parse_f64("PRICESCOUT_SHOPPING_BAND_LOW", "0.1")?,
        parse_f64("PRICESCOUT_SHOPPING_BAND_HIGH", "3.0")?,
    );

    let assist_model = or_default("PRICESCOUT_ASSIST_MODEL", "gemini-1.5-pro");
    let assist_timeout_secs = parse_u64("PRICESCOUT_ASSIST_TIMEOUT_SECS", "30")?;
    let assist_failure_threshold = parse_u32("PRICESCOUT_ASSIST_FAILURE_THRESHOLD", "3")?;

    Ok(AppConfig {
        search_api_key,
        assist_api_key,
        env,
        log_level,
        retailers_path,
        user_agent,
        search_timeout_secs,
        search_min_interval_ms,
        search_cooldown_secs,
        page_timeout_secs,
        early_stop_target,
        max_comparisons,
        default_band,
        shopping_band,
        assist_model,
        assist_timeout_secs,
        assist_failure_threshold,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
