use anyhow::{Context, Result};
use climate_insights::{web, ClimateConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Local development keeps the secrets in a .env file.
    dotenvy::dotenv().ok();

    let config = ClimateConfig::load().with_context(|| "Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(version = climate_insights::VERSION, "Starting Climate Insights");

    web::run(config).await
}
