//! Configuration for the `Swellcast` scraper
//!
//! All configuration comes from environment variables and is loaded through
//! an explicit call at process startup, then handed to the scraper. Nothing
//! here reads the environment implicitly at use time.

use std::env;

use crate::{Result, ScrapeError};

/// Default port for the webhook server
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind host for the webhook server
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Swellnet account credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account username or email
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create credentials from explicit values
    pub fn new<S: Into<String>>(username: S, password: S) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Load credentials from `SWELLNET_USERNAME` and `SWELLNET_PASSWORD`
    pub fn from_env() -> Result<Self> {
        let username = require_var("SWELLNET_USERNAME")?;
        let password = require_var("SWELLNET_PASSWORD")?;
        Ok(Self { username, password })
    }
}

/// Bind address settings for the webhook server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host interface to bind
    pub host: String,
    /// TCP port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Load server settings from `HOST` and `PORT`, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }

    /// The `host:port` pair to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn require_var(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ScrapeError::config(format!(
            "Missing {name} environment variable"
        ))),
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse()
        .map_err(|_| ScrapeError::config(format!("Invalid PORT value {raw:?}")))
}
