//! Browser session abstraction and the headless Chrome implementation
//!
//! The scrape sequence only needs a handful of page operations, so the
//! browser is modeled as a small async interface. Production code drives
//! Chrome over CDP via `chromiumoxide`; tests substitute a scripted fake.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{Result, ScrapeError};

/// Poll interval for selector and cookie waits
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One isolated browser session with a single page
///
/// Implementations must make `close` safe to call exactly once on every
/// exit path; the scraper guarantees it does so.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate the page to a URL and wait for the load to finish
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Wait until an element matching `selector` is attached, bounded by `timeout`
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Type `value` into the first element matching `selector`
    async fn fill(&mut self, selector: &str, value: &str) -> Result<()>;

    /// Click the first element matching `selector`
    async fn click(&mut self, selector: &str) -> Result<()>;

    /// Text content of the first element matching `selector`, if any
    async fn text_content(&mut self, selector: &str) -> Result<Option<String>>;

    /// Names of all cookies visible to the current page
    async fn cookie_names(&mut self) -> Result<Vec<String>>;

    /// Release the browser and its process
    async fn close(&mut self) -> Result<()>;
}

/// Real session backed by a fresh headless Chrome process
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    event_loop: JoinHandle<()>,
}

impl ChromiumSession {
    /// Launch headless Chrome with a fresh profile and open one blank page
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(ScrapeError::browser)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler stream must be polled for the CDP connection to make
        // progress; it ends when the browser process goes away.
        let event_loop = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        Ok(Self {
            browser,
            page,
            event_loop,
        })
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.page.goto(url).await?;
        Ok(())
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(ScrapeError::selector_timeout(selector, timeout));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<()> {
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        element.type_str(value).await?;
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        self.page.find_element(selector).await?.click().await?;
        Ok(())
    }

    async fn text_content(&mut self, selector: &str) -> Result<Option<String>> {
        let element = self.page.find_element(selector).await?;
        Ok(element.inner_text().await?)
    }

    async fn cookie_names(&mut self) -> Result<Vec<String>> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies.into_iter().map(|cookie| cookie.name).collect())
    }

    async fn close(&mut self) -> Result<()> {
        if let Err(error) = self.browser.close().await {
            warn!(%error, "browser did not close cleanly");
        }
        let _ = self.browser.wait().await;
        self.event_loop.abort();
        Ok(())
    }
}
