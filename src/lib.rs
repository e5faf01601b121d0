//! Scrapes a car dealer's model listing and financing prices through a
//! WebDriver-controlled browser and republishes them as a Merchant-style
//! RSS product feed.

pub mod browser;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetcher;
pub mod filter;
pub mod financing;
pub mod parsers;
pub mod pipeline;
pub mod results;
pub mod utils;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types for convenience
pub use browser::{Browser, WebDriverBrowser};
pub use config::{FeedConfig, FeedMode};
pub use error::{FeedError, Result};
pub use fetcher::{FetchSettings, PageFetcher};
pub use pipeline::{RunSummary, run};
pub use results::{FinancingOption, Model, ScrapedModel};
