//! UAttach Storefront - container packing service

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uattach_storefront::{config::AppConfig, http::{router, AppState}};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let config = AppConfig::from_env()?;
    tracing::info!(max_weight = %config.packing.max_weight, min_weight = %config.packing.min_weight, "container thresholds loaded");

    let app = router(AppState { packing: config.packing });
    tracing::info!("🚀 UAttach Storefront listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, app).await?;
    Ok(())
}
