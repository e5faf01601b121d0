use crate::browser::Browser;
use crate::error::{FeedError, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::time::Duration;

/// In-memory browser serving fixed markup per URL
#[derive(Debug, Default)]
pub struct FixtureBrowser {
    pages: HashMap<String, String>,
    current: Option<String>,
    consent_button: Option<String>,
    pub visited: Vec<String>,
    pub clicked: Vec<String>,
    pub paused: Duration,
}

impl FixtureBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, markup: &str) -> Self {
        self.pages.insert(url.to_string(), markup.to_string());
        self
    }

    /// Every page shows a button with this text until it is clicked
    pub fn with_consent_button(mut self, text: &str) -> Self {
        self.consent_button = Some(text.to_string());
        self
    }

    fn current_markup(&self) -> Result<&str> {
        self.current
            .as_ref()
            .and_then(|url| self.pages.get(url))
            .map(String::as_str)
            .ok_or_else(|| FeedError::WebDriver("no page loaded".to_string()))
    }
}

#[async_trait]
impl Browser for FixtureBrowser {
    async fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<()> {
        self.visited.push(url.to_string());
        if self.pages.contains_key(url) {
            self.current = Some(url.to_string());
            Ok(())
        } else {
            Err(FeedError::navigation(url, "net::ERR_NAME_NOT_RESOLVED"))
        }
    }

    async fn wait_for_selector(&mut self, selector: &str, _timeout: Duration) -> Result<()> {
        let markup = self.current_markup()?;
        let css = Selector::parse(selector)
            .map_err(|e| FeedError::WebDriver(format!("bad selector {}: {:?}", selector, e)))?;
        if Html::parse_document(markup).select(&css).next().is_some() {
            Ok(())
        } else {
            Err(FeedError::SelectorTimeout {
                selector: selector.to_string(),
                url: self.current.clone().unwrap_or_default(),
            })
        }
    }

    async fn pause(&mut self, duration: Duration) {
        self.paused += duration;
    }

    async fn markup(&mut self) -> Result<String> {
        self.current_markup().map(str::to_string)
    }

    async fn is_visible_with_text(
        &mut self,
        _tag: &str,
        text: &str,
        _timeout: Duration,
    ) -> Result<bool> {
        Ok(self
            .consent_button
            .as_deref()
            .is_some_and(|button| button.contains(text)))
    }

    async fn click_with_text(&mut self, _tag: &str, text: &str) -> Result<()> {
        self.clicked.push(text.to_string());
        self.consent_button = None;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.current = None;
        Ok(())
    }
}
