//! The browser capability the scraper needs.
//!
//! Anything that can navigate, wait for elements, hand back rendered markup
//! and click a control by its visible text can drive a run. Production uses a
//! WebDriver session; tests use an in-memory set of pages.

pub mod webdriver;

#[cfg(test)]
pub mod fixture;

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub use webdriver::WebDriverBrowser;

/// One controlled browser session. Calls are made strictly one after another.
#[async_trait]
pub trait Browser: Send {
    /// Load `url` and wait until the document has finished loading
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()>;

    /// Wait until an element matching the CSS selector exists on the current page
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Let client-side rendering catch up
    async fn pause(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Rendered markup of the current page
    async fn markup(&mut self) -> Result<String>;

    /// Whether a `tag` element whose visible text contains `text` shows up within `timeout`
    async fn is_visible_with_text(&mut self, tag: &str, text: &str, timeout: Duration)
    -> Result<bool>;

    /// Click the first `tag` element whose visible text contains `text`
    async fn click_with_text(&mut self, tag: &str, text: &str) -> Result<()>;

    /// End the session
    async fn close(&mut self) -> Result<()>;
}
