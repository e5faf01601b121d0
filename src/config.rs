use crate::error::Result;
use crate::filter::PackageFilterConfig;
use crate::parsers::model_page::ImageRules;
use crate::parsers::price::PriceFormat;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which feed a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// One item per model on the listing page
    Models,
    /// One item per (model, package, financing type)
    Financing,
}

/// Fixed texts of the feed's `<channel>` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// Channel texts for both feed modes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelTexts {
    #[serde(default = "default_models_channel")]
    pub models: ChannelInfo,

    #[serde(default = "default_financing_channel")]
    pub financing: ChannelInfo,
}

impl Default for ChannelTexts {
    fn default() -> Self {
        Self {
            models: default_models_channel(),
            financing: default_financing_channel(),
        }
    }
}

/// Configuration for one feed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Overview page listing every category and model
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Directory the feed (and status page) is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default = "default_mode")]
    pub mode: FeedMode,

    /// Brand stamped on every model and feed item
    #[serde(default = "default_brand")]
    pub brand: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Text of the cookie-consent accept button
    #[serde(default = "default_consent_text")]
    pub consent_text: String,

    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    #[serde(default = "default_selector_timeout_ms")]
    pub selector_timeout_ms: u64,

    #[serde(default = "default_consent_timeout_ms")]
    pub consent_timeout_ms: u64,

    /// Extra wait after the listing and model pages load
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Extra wait after a financing tab loads
    #[serde(default = "default_financing_settle_ms")]
    pub financing_settle_ms: u64,

    /// Also write an index.html summarizing the run
    #[serde(default = "default_write_status_page")]
    pub write_status_page: bool,

    #[serde(default)]
    pub channel: ChannelTexts,

    #[serde(default)]
    pub price_format: PriceFormat,

    #[serde(default)]
    pub package_filter: PackageFilterConfig,

    #[serde(default)]
    pub image_rules: ImageRules,
}

fn default_listing_url() -> String {
    "https://www.bjorkmansbil.se/modeller/?nav=nyhetererbjudanden".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_output_file() -> String {
    "feed.xml".to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_mode() -> FeedMode {
    FeedMode::Financing
}

fn default_brand() -> String {
    "Kia".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_consent_text() -> String {
    "Acceptera alla".to_string()
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_selector_timeout_ms() -> u64 {
    10_000
}

fn default_consent_timeout_ms() -> u64 {
    2_000
}

fn default_settle_ms() -> u64 {
    2_000
}

fn default_financing_settle_ms() -> u64 {
    1_500
}

fn default_write_status_page() -> bool {
    true
}

fn default_models_channel() -> ChannelInfo {
    ChannelInfo {
        title: "Björkmans Bil - Nya Kia Modeller".to_string(),
        link: "https://www.bjorkmansbil.se".to_string(),
        description: "Björkmans Bil - Kia Vehicle Models".to_string(),
    }
}

fn default_financing_channel() -> ChannelInfo {
    ChannelInfo {
        title: "Björkmans Bil - Nya Kia Modeller med Finansiering".to_string(),
        link: "https://www.bjorkmansbil.se".to_string(),
        description: "Björkmans Bil - Kia Models with Financing Options".to_string(),
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(&default_listing_url())
    }
}

impl FeedConfig {
    /// Create a new configuration with default values
    pub fn new(listing_url: &str) -> Self {
        Self {
            listing_url: listing_url.to_string(),
            output_dir: default_output_dir(),
            output_file: default_output_file(),
            webdriver_url: default_webdriver_url(),
            mode: default_mode(),
            brand: default_brand(),
            user_agent: default_user_agent(),
            consent_text: default_consent_text(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            selector_timeout_ms: default_selector_timeout_ms(),
            consent_timeout_ms: default_consent_timeout_ms(),
            settle_ms: default_settle_ms(),
            financing_settle_ms: default_financing_settle_ms(),
            write_status_page: default_write_status_page(),
            channel: ChannelTexts::default(),
            price_format: PriceFormat::default(),
            package_filter: PackageFilterConfig::default(),
            image_rules: ImageRules::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override the WebDriver URL with the WEBDRIVER_URL environment variable if set
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
    }

    /// Where the feed file goes
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    /// Channel header texts for the configured mode
    pub fn channel_info(&self) -> &ChannelInfo {
        match self.mode {
            FeedMode::Models => &self.channel.models,
            FeedMode::Financing => &self.channel.financing,
        }
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }

    pub fn consent_timeout(&self) -> Duration {
        Duration::from_millis(self.consent_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn financing_settle(&self) -> Duration {
        Duration::from_millis(self.financing_settle_ms)
    }
}
