/// Errors that can end a feed run, or a single model/financing scrape within it
#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    /// The page did not finish loading within the navigation timeout
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// An element the page is expected to carry never showed up
    #[error("selector `{selector}` not found on {url} (site structure changed?)")]
    SelectorTimeout { selector: String, url: String },

    /// The pipeline produced nothing worth publishing
    #[error("empty result: {0}")]
    EmptyResult(String),

    /// No WebDriver session, or a session command failed outside navigation
    #[error("webdriver error: {0}")]
    WebDriver(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = FeedError> = std::result::Result<T, E>;

impl FeedError {
    /// Builds a navigation error from anything displayable
    pub fn navigation(url: &str, reason: impl std::fmt::Display) -> Self {
        FeedError::Navigation {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
