//! Standalone dashboard binary.
//!
//! Reads `insight.toml` (or `$INSIGHT_CONFIG`) and honours `HOST` / `PORT`
//! overrides. Missing input tables fall back to the embedded sample data.

use insight_facade::{AppConfig, AppConfigBuilder};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "insight=info,tower_http=info".into()),
        )
        .init();

    let config_path = env::var("INSIGHT_CONFIG").ok().map(PathBuf::from);
    let config = AppConfig::load_or_default(config_path.as_deref())?;

    let mut builder = AppConfigBuilder::from_config(config).fallback_to_embedded(true);
    if let Ok(host) = env::var("HOST") {
        builder = builder.host(host);
    }
    if let Ok(port) = env::var("PORT") {
        builder = builder.port(port.parse()?);
    }

    insight_server::serve(builder.build()?).await?;
    Ok(())
}
