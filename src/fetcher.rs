use crate::browser::Browser;
use crate::config::FeedConfig;
use crate::error::Result;
use scraper::Html;
use std::time::Duration;

/// Timeouts and consent handling for one browser session
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub navigation_timeout: Duration,
    pub selector_timeout: Duration,
    pub consent_timeout: Duration,
    pub consent_text: String,
}

impl FetchSettings {
    pub fn from_config(config: &FeedConfig) -> Self {
        Self {
            navigation_timeout: config.navigation_timeout(),
            selector_timeout: config.selector_timeout(),
            consent_timeout: config.consent_timeout(),
            consent_text: config.consent_text.clone(),
        }
    }
}

/// Loads pages into a single shared browser session and runs DOM queries on them
pub struct PageFetcher<B: Browser> {
    browser: B,
    settings: FetchSettings,
    current_url: Option<String>,
}

impl<B: Browser> PageFetcher<B> {
    pub fn new(browser: B, settings: FetchSettings) -> Self {
        Self {
            browser,
            settings,
            current_url: None,
        }
    }

    /// Navigate to `url` and, if given, wait for `ready_selector` to appear.
    ///
    /// Fails with a navigation error when the page does not load within
    /// `timeout`, and with a selector timeout when the ready selector never
    /// shows up.
    pub async fn load(
        &mut self,
        url: &str,
        ready_selector: Option<&str>,
        timeout: Duration,
    ) -> Result<()> {
        self.current_url = None;
        self.browser.navigate(url, timeout).await?;
        self.current_url = Some(url.to_string());

        if let Some(selector) = ready_selector {
            self.browser
                .wait_for_selector(selector, self.settings.selector_timeout)
                .await?;
        }

        Ok(())
    }

    /// Load with the configured navigation timeout
    pub async fn open(&mut self, url: &str, ready_selector: Option<&str>) -> Result<()> {
        let timeout = self.settings.navigation_timeout;
        self.load(url, ready_selector, timeout).await
    }

    /// Give client-side rendering time to finish
    pub async fn settle(&mut self, duration: Duration) {
        self.browser.pause(duration).await;
    }

    /// Click the cookie-consent accept button if it shows up.
    /// Returns whether a button was clicked; never fails.
    pub async fn dismiss_consent(&mut self) -> bool {
        let text = self.settings.consent_text.clone();
        let visible = match self
            .browser
            .is_visible_with_text("button", &text, self.settings.consent_timeout)
            .await
        {
            Ok(visible) => visible,
            Err(e) => {
                ::log::debug!("Consent lookup failed: {}", e);
                false
            }
        };

        if !visible {
            return false;
        }

        match self.browser.click_with_text("button", &text).await {
            Ok(()) => {
                self.browser.pause(Duration::from_millis(500)).await;
                ::log::info!("Closed cookie banner");
                true
            }
            Err(e) => {
                ::log::debug!("Could not click consent button: {}", e);
                false
            }
        }
    }

    /// Rendered markup of the current page
    pub async fn markup(&mut self) -> Result<String> {
        self.browser.markup().await
    }

    /// Run a side-effect-free query over the current page's DOM
    pub async fn evaluate<T, F>(&mut self, query: F) -> Result<T>
    where
        F: FnOnce(&Html) -> T,
    {
        let markup = self.browser.markup().await?;
        let doc = Html::parse_document(&markup);
        Ok(query(&doc))
    }

    /// URL of the last successfully loaded page
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// End the browser session
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await
    }
}
