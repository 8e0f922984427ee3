//! Webhook trigger surface: serve the scraper behind `POST /webhook`

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use swellcast::config::{Credentials, ServerConfig};
use swellcast::scraper::ChromiumForecastSource;
use swellcast::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let credentials =
        Credentials::from_env().context("Failed to load Swellnet credentials")?;
    let server = ServerConfig::from_env()?;

    let source = Arc::new(ChromiumForecastSource::new(credentials));
    web::run(source, &server).await
}
