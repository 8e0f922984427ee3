//! CLI trigger surface: run one scrape and print the formatted forecast

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use swellcast::browser::ChromiumSession;
use swellcast::config::Credentials;
use swellcast::formatter::format_forecast;
use swellcast::scraper::scrape_forecast;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let credentials =
        Credentials::from_env().context("Failed to load Swellnet credentials")?;

    let session = ChromiumSession::launch()
        .await
        .context("Failed to launch headless browser")?;
    let forecast = scrape_forecast(session, &credentials).await?;

    info!("forecast retrieved, formatting");
    println!("\nFormatted Forecast:");
    println!("==================");
    println!("{}", format_forecast(&forecast));
    println!("==================\n");

    Ok(())
}
