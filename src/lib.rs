//! `Swellcast` - Swellnet surf forecast retrieval
//!
//! This library automates a logged-in scrape of the Swellnet forecaster
//! notes page, extracts the forecast text, and optionally reformats it as
//! a markdown-like document. The scrape can be triggered from the CLI
//! binary or through the webhook HTTP server.

pub mod browser;
pub mod config;
pub mod error;
pub mod formatter;
pub mod scraper;
pub mod web;

// Re-export core types for public API
pub use browser::{BrowserSession, ChromiumSession};
pub use config::{Credentials, ServerConfig};
pub use error::ScrapeError;
pub use formatter::format_forecast;
pub use scraper::{ChromiumForecastSource, ForecastSource, scrape_forecast};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ScrapeError>;
