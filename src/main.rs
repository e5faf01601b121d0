use clap::Parser;
use dealer_feed::{FeedConfig, FetchSettings, PageFetcher, RunSummary, WebDriverBrowser};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging, progress is shown unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!("Starting {:?} feed run for: {}", config.mode, config.listing_url);
    let start_time = std::time::Instant::now();

    match run(&config).await {
        Ok(summary) => {
            log_summary(&summary, start_time.elapsed().as_secs_f64());
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Feed generation failed: {}", e);
            ::log::debug!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the pipeline on a fresh WebDriver session and always closes it
async fn run(config: &FeedConfig) -> dealer_feed::Result<RunSummary> {
    let browser = WebDriverBrowser::connect(&config.webdriver_url, &config.user_agent).await?;
    let mut fetcher = PageFetcher::new(browser, FetchSettings::from_config(config));

    let result = dealer_feed::run(&mut fetcher, config).await;

    if let Err(e) = fetcher.close().await {
        ::log::warn!("Failed to close browser session: {}", e);
    }

    result
}

fn log_summary(summary: &RunSummary, seconds: f64) {
    ::log::info!(
        "Feed complete - {} models, {} items written to {} in {:.2} seconds",
        summary.models_found,
        summary.items,
        summary.output_path.display(),
        seconds
    );
    if summary.scan.types_attempted > 0 {
        ::log::info!(
            "Model pages: {} scraped, {} failed; financing types: {} of {} scanned; labels: {} matched, {} rejected, {} not prices",
            summary.models_scraped,
            summary.models_failed,
            summary.scan.types_succeeded,
            summary.scan.types_attempted,
            summary.scan.labels_matched,
            summary.scan.labels_rejected,
            summary.scan.labels_mismatched()
        );
    }
}
