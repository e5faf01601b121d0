//! One feed run from listing page to written feed.
//!
//! Failure policy: the listing page failing to load, or the run producing no
//! models or no feed items, ends the run with an error and leaves any
//! previously written feed untouched. Partial degradation is tolerated at
//! sub-model granularity: a model page or financing tab that fails is logged,
//! counted in the [`RunSummary`] and skipped.

use crate::browser::Browser;
use crate::catalog::ModelCatalog;
use crate::config::{FeedConfig, FeedMode};
use crate::error::{FeedError, Result};
use crate::feed::status::{StatusPage, StatusRow};
use crate::feed::{self, FeedItem};
use crate::fetcher::PageFetcher;
use crate::financing::{FinancingExtractor, ScanReport};
use crate::parsers::listing;
use crate::results::{Model, ScrapedModel};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Counts gathered over one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub mode: FeedMode,
    /// Unique models on the listing page
    pub models_found: usize,
    /// Model pages scraped successfully (financing mode)
    pub models_scraped: usize,
    /// Model pages that failed to load (financing mode)
    pub models_failed: usize,
    pub scan: ScanReport,
    pub items: usize,
    pub bytes: usize,
    pub output_path: PathBuf,
}

impl RunSummary {
    fn new(mode: FeedMode, output_path: PathBuf) -> Self {
        Self {
            mode,
            models_found: 0,
            models_scraped: 0,
            models_failed: 0,
            scan: ScanReport::default(),
            items: 0,
            bytes: 0,
            output_path,
        }
    }
}

/// Fetch the listing, extract models, optionally scrape financing, then
/// serialize and write the feed
pub async fn run<B: Browser>(
    fetcher: &mut PageFetcher<B>,
    config: &FeedConfig,
) -> Result<RunSummary> {
    let mut summary = RunSummary::new(config.mode, config.output_path());

    let catalog = fetch_models(fetcher, config).await?;
    summary.models_found = catalog.len();

    let (items, rows) = match config.mode {
        FeedMode::Models => {
            let models = catalog.into_models();
            (feed::model_items(&models), status_rows_for_models(&models))
        }
        FeedMode::Financing => {
            let extractor = FinancingExtractor::from_config(config)?;
            let scraped = scrape_financing(fetcher, &extractor, catalog.models(), &mut summary).await;

            ::log::info!(
                "Scraped {} models, {} failed, {} financing options",
                summary.models_scraped,
                summary.models_failed,
                scraped.iter().map(|m| m.financing_options.len()).sum::<usize>()
            );

            (
                feed::financing_items(&scraped, &config.brand, &config.price_format),
                status_rows_for_scraped(&scraped),
            )
        }
    };

    if items.is_empty() {
        return Err(FeedError::EmptyResult(
            "no feed items produced; check whether the website structure has changed".to_string(),
        ));
    }

    let xml = feed::render(config.channel_info(), &items);
    summary.items = items.len();
    summary.bytes = xml.len();

    write_feed(&summary.output_path, &xml)?;
    ::log::info!(
        "Saved feed to {} ({:.2} KB, {} items)",
        summary.output_path.display(),
        xml.len() as f64 / 1024.0,
        items.len()
    );

    if config.write_status_page {
        write_status_page(config, &items, rows)?;
    }

    Ok(summary)
}

/// Loads the listing page and merges every model card into a fresh catalog.
/// The listing failing to load, or holding no models, is fatal.
pub async fn fetch_models<B: Browser>(
    fetcher: &mut PageFetcher<B>,
    config: &FeedConfig,
) -> Result<ModelCatalog> {
    let listing_url = Url::parse(&config.listing_url)?;
    ::log::info!("Loading model overview: {}", listing_url);

    fetcher
        .open(listing_url.as_str(), Some(listing::READY_SELECTOR))
        .await?;
    fetcher.settle(config.settle()).await;
    fetcher.dismiss_consent().await;

    let entries = fetcher
        .evaluate(|doc| listing::extract_entries(doc, listing_url.as_str()))
        .await?;
    ::log::info!("Found {} model cards", entries.len());

    let mut catalog = ModelCatalog::new(&config.brand);
    catalog.extend(entries);

    if catalog.is_empty() {
        return Err(FeedError::EmptyResult(
            "no models found on the listing page; check whether the website structure has changed"
                .to_string(),
        ));
    }

    ::log::info!("Parsed {} unique models", catalog.len());
    for (category, count) in catalog.category_counts() {
        ::log::info!("  {}: {}", category, count);
    }

    Ok(catalog)
}

/// Scrapes every model page in order; a model page that fails is skipped
async fn scrape_financing<B: Browser>(
    fetcher: &mut PageFetcher<B>,
    extractor: &FinancingExtractor,
    models: &[Model],
    summary: &mut RunSummary,
) -> Vec<ScrapedModel> {
    let mut scraped = Vec::with_capacity(models.len());

    for model in models {
        match extractor.extract(fetcher, &model.url).await {
            Ok(scan) => {
                summary.models_scraped += 1;
                summary.scan.add(&scan.report);
                scraped.push(scan.model);
            }
            Err(e) => {
                summary.models_failed += 1;
                ::log::error!("Error scraping {}: {}", model.url, e);
            }
        }
    }

    scraped
}

fn status_rows_for_models(models: &[Model]) -> Vec<StatusRow> {
    models.iter().map(StatusRow::from_model).collect()
}

fn status_rows_for_scraped(models: &[ScrapedModel]) -> Vec<StatusRow> {
    models.iter().map(StatusRow::from_scraped).collect()
}

/// Writes the feed through a sibling temp file so a crash never leaves a half-written feed
fn write_feed(path: &Path, xml: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let tmp = path.with_extension("xml.tmp");
    fs::write(&tmp, xml)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn write_status_page(config: &FeedConfig, items: &[FeedItem], rows: Vec<StatusRow>) -> Result<()> {
    let detail_heading = match config.mode {
        FeedMode::Models => "Categories",
        FeedMode::Financing => "Financing types",
    };

    let page = StatusPage {
        title: &config.channel_info().title,
        feed_file: &config.output_file,
        detail_heading,
        rows,
        item_count: items.len(),
        updated: chrono::Local::now(),
    };

    let path = config.output_dir.join("index.html");
    fs::write(&path, page.render())?;
    ::log::info!("Created {}", path.display());
    Ok(())
}
