//! Forecast retrieval sequence for the Swellnet forecaster notes page
//!
//! One invocation logs in, opens the newest forecaster notes post, and
//! extracts its body text. The sequence is strictly linear and the browser
//! session is released on every exit path.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::browser::{BrowserSession, ChromiumSession, POLL_INTERVAL};
use crate::config::Credentials;
use crate::{Result, ScrapeError};

/// Swellnet login form, redirecting to the front page on success
pub const LOGIN_URL: &str = "https://www.swellnet.com/user/login?destination=/";

/// Listing page for the Tweed Coast forecaster notes
pub const FORECASTER_NOTES_URL: &str =
    "https://www.swellnet.com/reports/australia/new-south-wales/tweed-coast/forecaster-notes";

const USERNAME_FIELD: &str = "#edit-name";
const PASSWORD_FIELD: &str = "#edit-pass";
const SUBMIT_BUTTON: &str = "#edit-submit";
const LISTING_ROW: &str = ".views-row-1";
const FIRST_POST_LINK: &str = ".views-row-1 a";
const POST_MARKER: &str = ".node-forecaster-notes";
const BODY_FIELD: &str =
    ".field.field-name-body.field-type-text-with-summary.field-label-hidden";

/// Cookie name prefix Drupal sets once a login succeeds
const SESSION_COOKIE_PREFIX: &str = "SESS";

const SELECTOR_WAIT: Duration = Duration::from_secs(30);
const LOGIN_COOKIE_WAIT: Duration = Duration::from_secs(10);

/// Run one full retrieval against `session` and return the trimmed raw
/// forecast text.
///
/// The session is closed exactly once, whichever step succeeds or fails.
pub async fn scrape_forecast<S: BrowserSession>(
    mut session: S,
    credentials: &Credentials,
) -> Result<String> {
    let outcome = run_sequence(&mut session, credentials).await;
    let closed = session.close().await;
    let forecast = outcome?;
    closed?;
    Ok(forecast)
}

async fn run_sequence<S>(session: &mut S, credentials: &Credentials) -> Result<String>
where
    S: BrowserSession + ?Sized,
{
    info!("opening login page");
    session.navigate(LOGIN_URL).await?;
    session.wait_for_selector(USERNAME_FIELD, SELECTOR_WAIT).await?;
    session.wait_for_selector(PASSWORD_FIELD, SELECTOR_WAIT).await?;

    debug!("filling login form");
    session.fill(USERNAME_FIELD, &credentials.username).await?;
    session.fill(PASSWORD_FIELD, &credentials.password).await?;
    session.click(SUBMIT_BUTTON).await?;

    wait_for_session_cookie(session, LOGIN_COOKIE_WAIT).await?;
    info!("logged in, session cookie present");

    info!("navigating to forecaster notes");
    session.navigate(FORECASTER_NOTES_URL).await?;
    session.wait_for_selector(LISTING_ROW, SELECTOR_WAIT).await?;

    debug!("opening first post");
    session.click(FIRST_POST_LINK).await?;
    session.wait_for_selector(POST_MARKER, SELECTOR_WAIT).await?;
    session.wait_for_selector(BODY_FIELD, SELECTOR_WAIT).await?;

    match session.text_content(BODY_FIELD).await? {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(ScrapeError::no_content("forecast body field was empty")),
    }
}

/// Poll for a `SESS`-prefixed cookie rather than sleeping a fixed settle
/// delay after form submission. No such cookie within the bound means the
/// credentials were rejected, not that the page timed out.
async fn wait_for_session_cookie<S>(session: &mut S, timeout: Duration) -> Result<()>
where
    S: BrowserSession + ?Sized,
{
    let start = Instant::now();
    loop {
        let names = session.cookie_names().await?;
        if names
            .iter()
            .any(|name| name.starts_with(SESSION_COOKIE_PREFIX))
        {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(ScrapeError::login_failed(format!(
                "no {SESSION_COOKIE_PREFIX}-prefixed cookie after submitting the login form"
            )));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Something the trigger surfaces can ask for one forecast
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Produce the raw forecast text, or fail
    async fn fetch(&self) -> Result<String>;
}

/// Production source: one fresh headless Chrome session per fetch
pub struct ChromiumForecastSource {
    credentials: Credentials,
}

impl ChromiumForecastSource {
    /// Create a source bound to the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl ForecastSource for ChromiumForecastSource {
    async fn fetch(&self) -> Result<String> {
        let session = ChromiumSession::launch().await?;
        scrape_forecast(session, &self.credentials).await
    }
}
