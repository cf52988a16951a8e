use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pricescout_assist::{GeminiAssist, GuardedAssist};
use pricescout_core::{load_app_config, load_retailers, ProductDescriptor, RetailerDirectory};
use pricescout_pipeline::{Orchestrator, PipelineSettings};
use pricescout_searchapi::{RateLimiter, SearchApiClient};
use pricescout_verify::Validator;

#[derive(Debug, Parser)]
#[command(name = "pricescout")]
#[command(about = "Find verified price comparisons for a product across retailers")]
struct Cli {
    /// Product title as the retailer lists it.
    #[arg(long)]
    title: String,

    /// Manufacturer model number, if known.
    #[arg(long)]
    model: Option<String>,

    /// Brand name, if known.
    #[arg(long)]
    brand: Option<String>,

    /// Price the product was seen at; anchors the comparison price band.
    #[arg(long)]
    price: Option<f64>,

    /// Currency symbol for comparison prices.
    #[arg(long, env = "PRICESCOUT_CURRENCY", default_value = "€")]
    currency: String,

    /// Country whose retailers rank first.
    #[arg(long, env = "PRICESCOUT_COUNTRY", default_value = "United States")]
    country: String,

    /// Print a JSON envelope instead of a table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        env = %config.env,
        assist_enabled = config.assist_api_key.is_some(),
        "configuration loaded"
    );

    let limiter = Arc::new(RateLimiter::new(
        Duration::from_millis(config.search_min_interval_ms),
        Duration::from_secs(config.search_cooldown_secs),
    ));
    let search_client = SearchApiClient::new(
        &config.search_api_key,
        config.search_timeout_secs,
        &config.user_agent,
        limiter,
    )?;
    let validator = Validator::new(config.page_timeout_secs, &config.user_agent)?;
    let retailers = match &config.retailers_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading retailers file");
            load_retailers(path)?
        }
        None => RetailerDirectory::builtin(),
    };
    let assist = match &config.assist_api_key {
        Some(key) => {
            let client = GeminiAssist::new(key, &config.assist_model, config.assist_timeout_secs)?;
            Some(GuardedAssist::new(client, config.assist_failure_threshold))
        }
        None => None,
    };
    let settings = PipelineSettings {
        early_stop_target: config.early_stop_target,
        max_comparisons: config.max_comparisons,
        default_band: config.default_band,
        shopping_band: config.shopping_band,
    };
    let orchestrator = Orchestrator::new(search_client, validator, retailers, assist, settings);

    let descriptor = ProductDescriptor {
        title: cli.title,
        model: cli.model,
        brand: cli.brand,
        price: cli.price,
        currency: cli.currency,
        country: cli.country,
    };
    let comparisons = orchestrator.run(&descriptor).await;

    if cli.json {
        let envelope = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "product": &descriptor,
            "comparisons": &comparisons,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    if comparisons.is_empty() {
        println!("No comparisons found for \"{}\".", descriptor.title);
        return Ok(());
    }

    println!(
        "Found {} comparisons for \"{}\":\n",
        comparisons.len(),
        descriptor.title
    );
    for (position, comparison) in comparisons.iter().enumerate() {
        println!(
            "{:>3}. {}{:<9.2} {:<24} {}",
            position + 1,
            comparison.currency,
            comparison.price,
            comparison.store,
            comparison.title
        );
        println!("     {}", comparison.url);
    }

    Ok(())
}
