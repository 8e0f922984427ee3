//! Error types and handling for the `Swellcast` scraper

use std::time::Duration;

use thiserror::Error;

/// Main error type for the `Swellcast` scraper
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A bounded wait for a page element expired
    #[error("Timed out after {timeout:?} waiting for selector {selector:?}")]
    SelectorTimeout { selector: String, timeout: Duration },

    /// Login form submitted but no session cookie appeared
    #[error("Login failed: {message}")]
    LoginFailed { message: String },

    /// Target page reached but the forecast body was empty or missing
    #[error("No content found: {message}")]
    NoContent { message: String },

    /// Any other browser/CDP fault
    #[error("Browser error: {message}")]
    Browser { message: String },
}

impl ScrapeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new selector-timeout error
    pub fn selector_timeout<S: Into<String>>(selector: S, timeout: Duration) -> Self {
        Self::SelectorTimeout {
            selector: selector.into(),
            timeout,
        }
    }

    /// Create a new login-failure error
    pub fn login_failed<S: Into<String>>(message: S) -> Self {
        Self::LoginFailed {
            message: message.into(),
        }
    }

    /// Create a new missing-content error
    pub fn no_content<S: Into<String>>(message: S) -> Self {
        Self::NoContent {
            message: message.into(),
        }
    }

    /// Create a new browser error
    pub fn browser<S: Into<String>>(message: S) -> Self {
        Self::Browser {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ScrapeError::Config { .. } => {
                "Configuration error. Please check your Swellnet credentials.".to_string()
            }
            ScrapeError::SelectorTimeout { selector, .. } => {
                format!("The page never showed {selector}. Swellnet may have changed its markup.")
            }
            ScrapeError::LoginFailed { .. } => {
                "Login failed. Please verify your Swellnet username and password.".to_string()
            }
            ScrapeError::NoContent { .. } => {
                "The forecast page loaded but contained no forecast text.".to_string()
            }
            ScrapeError::Browser { message } => message.clone(),
        }
    }
}

impl From<chromiumoxide::error::CdpError> for ScrapeError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        ScrapeError::Browser {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ScrapeError::config("missing SWELLNET_USERNAME");
        assert!(matches!(config_err, ScrapeError::Config { .. }));

        let login_err = ScrapeError::login_failed("no SESS cookie");
        assert!(matches!(login_err, ScrapeError::LoginFailed { .. }));

        let content_err = ScrapeError::no_content("body field empty");
        assert!(matches!(content_err, ScrapeError::NoContent { .. }));
    }

    #[test]
    fn test_selector_timeout_display_names_selector() {
        let err = ScrapeError::selector_timeout(".views-row-1", Duration::from_secs(30));
        let message = err.to_string();
        assert!(message.contains(".views-row-1"));
        assert!(message.contains("30"));
    }

    #[test]
    fn test_user_messages() {
        let config_err = ScrapeError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let login_err = ScrapeError::login_failed("test");
        assert!(login_err.user_message().contains("Login failed"));

        let timeout_err = ScrapeError::selector_timeout("#edit-name", Duration::from_secs(1));
        assert!(timeout_err.user_message().contains("#edit-name"));
    }
}
