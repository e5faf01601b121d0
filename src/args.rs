use clap::{Parser, ValueEnum};
use dealer_feed::{FeedConfig, FeedMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dealer-feed")]
#[command(about = "Scrapes dealer models and financing prices into a product feed")]
#[command(version)]
pub struct Args {
    /// JSON configuration file (every field optional)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listing page to start from
    #[arg(short, long)]
    pub url: Option<String>,

    /// Directory the feed is written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Feed to produce
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// WebDriver server (overrides WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Do not write index.html next to the feed
    #[arg(long)]
    pub no_status_page: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Models,
    Financing,
}

impl From<ModeArg> for FeedMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Models => FeedMode::Models,
            ModeArg::Financing => FeedMode::Financing,
        }
    }
}

impl Args {
    /// Build the run configuration: file (or defaults), then WEBDRIVER_URL, then flags
    pub fn into_config(self) -> dealer_feed::Result<FeedConfig> {
        let mut config = match &self.config {
            Some(path) => FeedConfig::from_file(path)?,
            None => FeedConfig::default(),
        };
        config.apply_env();

        if let Some(url) = self.url {
            config.listing_url = url;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(webdriver_url) = self.webdriver_url {
            config.webdriver_url = webdriver_url;
        }
        if self.no_status_page {
            config.write_status_page = false;
        }

        Ok(config)
    }
}
