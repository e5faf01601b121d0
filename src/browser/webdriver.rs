use crate::browser::Browser;
use crate::error::{FeedError, Result};
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;

/// Browser session driven over the WebDriver protocol (e.g. ChromeDriver)
pub struct WebDriverBrowser {
    client: Client,
    current_url: String,
}

impl WebDriverBrowser {
    /// Starts a headless Chrome session on the given WebDriver server,
    /// falling back to the usual local WebDriver ports
    pub async fn connect(webdriver_url: &str, user_agent: &str) -> Result<Self> {
        let client = connect_to_webdriver(webdriver_url, user_agent).await?;
        Ok(Self {
            client,
            current_url: String::new(),
        })
    }
}

/// Chrome options for an unattended run on a CI box
fn capabilities(user_agent: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut caps = serde_json::Map::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({
            "args": [
                "--headless=new",
                "--no-sandbox",
                "--disable-setuid-sandbox",
                "--disable-dev-shm-usage",
                "--disable-gpu",
                format!("--user-agent={}", user_agent),
            ]
        }),
    );
    caps
}

/// Connects to the WebDriver instance
async fn connect_to_webdriver(webdriver_url: &str, user_agent: &str) -> Result<Client> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities(user_agent));

    match builder.connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    // If we couldn't connect, try with common alternative URLs
    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://127.0.0.1:4444", // Try with IP instead of localhost
    ];

    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = builder.connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    Err(FeedError::WebDriver(format!(
        "no WebDriver server reachable at {} (set WEBDRIVER_URL or start chromedriver)",
        webdriver_url
    )))
}

/// XPath for a `tag` element whose normalized text contains `text`
fn text_xpath(tag: &str, text: &str) -> String {
    format!("//{}[contains(normalize-space(.), {})]", tag, xpath_literal(text))
}

/// Quotes a string for XPath 1.0, which has no escape sequences
fn xpath_literal(text: &str) -> String {
    if !text.contains('"') {
        format!("\"{}\"", text)
    } else if !text.contains('\'') {
        format!("'{}'", text)
    } else {
        let parts: Vec<String> = text.split('"').map(|p| format!("\"{}\"", p)).collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}

/// Maps a failed navigation command, calling out lost sessions
fn navigation_error(error: fantoccini::error::CmdError, url: &str) -> FeedError {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost WebDriver session while loading {}", url);
    }
    FeedError::navigation(url, error)
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()> {
        ::log::debug!("GOTO: {}", url);
        match tokio::time::timeout(timeout, self.client.goto(url)).await {
            Ok(Ok(())) => {
                self.current_url = url.to_string();
                Ok(())
            }
            Ok(Err(e)) => Err(navigation_error(e, url)),
            Err(_) => Err(FeedError::navigation(
                url,
                format!("not loaded within {} ms", timeout.as_millis()),
            )),
        }
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
            .map(|_| ())
            .map_err(|e| {
                ::log::debug!("Waiting for {} failed: {}", selector, e);
                FeedError::SelectorTimeout {
                    selector: selector.to_string(),
                    url: self.current_url.clone(),
                }
            })
    }

    async fn markup(&mut self) -> Result<String> {
        self.client
            .source()
            .await
            .map_err(|e| FeedError::WebDriver(format!("reading source of {}: {}", self.current_url, e)))
    }

    async fn is_visible_with_text(
        &mut self,
        tag: &str,
        text: &str,
        timeout: Duration,
    ) -> Result<bool> {
        let xpath = text_xpath(tag, text);
        let element = match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::XPath(&xpath))
            .await
        {
            Ok(element) => element,
            Err(_) => return Ok(false),
        };

        element
            .is_displayed()
            .await
            .map_err(|e| FeedError::WebDriver(e.to_string()))
    }

    async fn click_with_text(&mut self, tag: &str, text: &str) -> Result<()> {
        let xpath = text_xpath(tag, text);
        let element = self
            .client
            .find(Locator::XPath(&xpath))
            .await
            .map_err(|e| FeedError::WebDriver(e.to_string()))?;

        element
            .click()
            .await
            .map_err(|e| FeedError::WebDriver(e.to_string()))
    }

    async fn close(&mut self) -> Result<()> {
        self.client
            .clone()
            .close()
            .await
            .map_err(|e| FeedError::WebDriver(e.to_string()))
    }
}
