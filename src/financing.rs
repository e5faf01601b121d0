//! Financing prices from model detail pages.
//!
//! A model page carries one button per financing type, each pointing at a URL
//! that renders that type's packages as radio labels. Every type is scanned
//! on its own: a tab that fails to load is logged and counted, and the
//! remaining tabs are still scanned.

use crate::browser::Browser;
use crate::config::FeedConfig;
use crate::error::Result;
use crate::fetcher::PageFetcher;
use crate::filter::{PackageFilter, Rejection};
use crate::parsers::model_page::{self, FinancingTarget, ImageRules};
use crate::parsers::price::LabelParser;
use crate::results::{FinancingOption, ScrapedModel};
use std::collections::HashMap;
use std::time::Duration;

/// Counters for one model (or, summed, for a whole run)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub types_attempted: usize,
    pub types_succeeded: usize,
    pub labels_seen: usize,
    pub labels_matched: usize,
    pub labels_rejected: usize,
}

impl ScanReport {
    pub fn add(&mut self, other: &ScanReport) {
        self.types_attempted += other.types_attempted;
        self.types_succeeded += other.types_succeeded;
        self.labels_seen += other.labels_seen;
        self.labels_matched += other.labels_matched;
        self.labels_rejected += other.labels_rejected;
    }

    /// Labels that did not look like a price at all
    pub fn labels_mismatched(&self) -> usize {
        self.labels_seen - self.labels_matched
    }
}

/// A scraped model page with the counters gathered while scanning it
#[derive(Debug, Clone)]
pub struct ModelScan {
    pub model: ScrapedModel,
    pub report: ScanReport,
}

/// Reads label texts from one financing tab into options
#[derive(Debug)]
pub struct LabelScanner {
    parser: LabelParser,
    filter: PackageFilter,
}

impl LabelScanner {
    pub fn new(parser: LabelParser, filter: PackageFilter) -> Self {
        Self { parser, filter }
    }

    /// Turns label texts into options for `financing_type`.
    /// Labels that are not prices are skipped; noise is rejected and counted.
    pub fn scan(
        &self,
        financing_type: &str,
        labels: &[String],
        report: &mut ScanReport,
    ) -> Vec<FinancingOption> {
        let mut options = Vec::new();

        for label in labels {
            report.labels_seen += 1;

            let Some(parsed) = self.parser.parse(label) else {
                continue;
            };
            report.labels_matched += 1;

            match self.filter.check(&parsed.package_name, parsed.monthly_price) {
                Ok(()) => options.push(FinancingOption::new(
                    financing_type,
                    &parsed.package_name,
                    parsed.monthly_price,
                )),
                Err(rejection) => {
                    report.labels_rejected += 1;
                    log_rejection(label, rejection);
                }
            }
        }

        options
    }
}

impl Default for LabelScanner {
    fn default() -> Self {
        Self::new(LabelParser::default(), PackageFilter::default())
    }
}

fn log_rejection(label: &str, rejection: Rejection) {
    ::log::debug!("Skipping {:?}: {:?}", label, rejection);
}

/// Keeps one option per (package, financing type), the cheapest one.
/// Keys stay in first-seen order.
pub fn dedupe(options: Vec<FinancingOption>) -> Vec<FinancingOption> {
    let mut unique: Vec<FinancingOption> = Vec::with_capacity(options.len());
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for option in options {
        let key = (option.package_name.clone(), option.financing_type.clone());
        match index.get(&key) {
            Some(&i) => {
                if option.monthly_price < unique[i].monthly_price {
                    unique[i] = option;
                }
            }
            None => {
                index.insert(key, unique.len());
                unique.push(option);
            }
        }
    }

    unique
}

/// Scrapes name, image and every financing type's packages from model pages
#[derive(Debug)]
pub struct FinancingExtractor {
    scanner: LabelScanner,
    image_rules: ImageRules,
    settle: Duration,
    financing_settle: Duration,
}

impl FinancingExtractor {
    pub fn new(
        scanner: LabelScanner,
        image_rules: ImageRules,
        settle: Duration,
        financing_settle: Duration,
    ) -> Self {
        Self {
            scanner,
            image_rules,
            settle,
            financing_settle,
        }
    }

    /// Build the extractor from configuration
    pub fn from_config(config: &FeedConfig) -> Result<Self, regex::Error> {
        let parser = LabelParser::new(config.price_format.clone())?;
        let filter = PackageFilter::new(config.package_filter.clone())?;
        Ok(Self::new(
            LabelScanner::new(parser, filter),
            config.image_rules.clone(),
            config.settle(),
            config.financing_settle(),
        ))
    }

    /// Scrape one model page.
    ///
    /// Fails only when the model page itself cannot be loaded or read; a
    /// financing tab that fails is logged and skipped.
    pub async fn extract<B: Browser>(
        &self,
        fetcher: &mut PageFetcher<B>,
        model_url: &str,
    ) -> Result<ModelScan> {
        ::log::info!("Scraping: {}", model_url);

        fetcher.open(model_url, None).await?;
        fetcher.settle(self.settle).await;
        fetcher.dismiss_consent().await;

        let rules = &self.image_rules;
        let (info, targets) = fetcher
            .evaluate(|doc| {
                (
                    model_page::extract_model_info(doc, model_url, rules),
                    model_page::extract_financing_targets(doc, model_url),
                )
            })
            .await?;

        ::log::info!("  Model: {}", info.model_name);
        if !info.image_url.is_empty() {
            ::log::debug!("  Image: {}", info.image_url);
        }
        ::log::info!("  Found {} financing types", targets.len());

        let mut report = ScanReport::default();
        let mut all_options = Vec::new();

        for target in &targets {
            report.types_attempted += 1;
            match self.scan_target(fetcher, target, &mut report).await {
                Ok(options) => {
                    report.types_succeeded += 1;
                    ::log::info!(
                        "    {}: {} package options",
                        target.financing_type,
                        options.len()
                    );
                    for option in &options {
                        ::log::debug!(
                            "      - {}: {} kr/mån",
                            option.package_name,
                            option.monthly_price
                        );
                    }
                    all_options.extend(options);
                }
                Err(e) => {
                    ::log::warn!(
                        "    Skipping financing type {} ({}): {}",
                        target.financing_type,
                        target.url,
                        e
                    );
                }
            }
        }

        let financing_options = dedupe(all_options);
        ::log::info!(
            "  {} unique options ({} of {} financing types scanned)",
            financing_options.len(),
            report.types_succeeded,
            report.types_attempted
        );

        Ok(ModelScan {
            model: ScrapedModel {
                model_name: info.model_name,
                model_url: model_url.to_string(),
                image_url: info.image_url,
                financing_options,
            },
            report,
        })
    }

    async fn scan_target<B: Browser>(
        &self,
        fetcher: &mut PageFetcher<B>,
        target: &FinancingTarget,
        report: &mut ScanReport,
    ) -> Result<Vec<FinancingOption>> {
        ::log::debug!("    {} -> {}", target.financing_type, target.url);
        fetcher.open(&target.url, None).await?;
        fetcher.settle(self.financing_settle).await;

        let labels = fetcher.evaluate(model_page::extract_radio_labels).await?;
        Ok(self.scanner.scan(&target.financing_type, &labels, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fixture::FixtureBrowser;
    use crate::fetcher::FetchSettings;
    use crate::fixtures;

    fn labels(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    fn fetcher(browser: FixtureBrowser) -> PageFetcher<FixtureBrowser> {
        PageFetcher::new(browser, FetchSettings::from_config(&FeedConfig::default()))
    }

    fn extractor() -> FinancingExtractor {
        FinancingExtractor::from_config(&FeedConfig::default()).unwrap()
    }

    #[test]
    fn test_scan_keeps_packages_and_counts_noise() {
        let scanner = LabelScanner::default();
        let mut report = ScanReport::default();
        let options = scanner.scan(
            "Privatleasing",
            &labels(&[
                "Plus FWD Long Range 3 412 kr/mån",
                "+ Dragkrok 299 kr/mån",
                "Privatleasing 12-36 mån 500 kr/mån",
                "X 500 kr/mån",
                "Välj färg",
            ]),
            &mut report,
        );

        assert_eq!(
            options,
            vec![FinancingOption::new("Privatleasing", "Plus FWD Long Range", 3412)]
        );
        assert_eq!(report.labels_seen, 5);
        assert_eq!(report.labels_matched, 4);
        assert_eq!(report.labels_rejected, 3);
        assert_eq!(report.labels_mismatched(), 1);
    }

    #[test]
    fn test_dedupe_keeps_lowest_price() {
        let options = dedupe(vec![
            FinancingOption::new("Billån", "Plus", 3412),
            FinancingOption::new("Billån", "GT-Line", 4100),
            FinancingOption::new("Billån", "Plus", 3200),
            FinancingOption::new("Billån", "Plus", 3300),
        ]);

        assert_eq!(
            options,
            vec![
                FinancingOption::new("Billån", "Plus", 3200),
                FinancingOption::new("Billån", "GT-Line", 4100),
            ]
        );
    }

    #[test]
    fn test_dedupe_key_includes_financing_type() {
        let options = dedupe(vec![
            FinancingOption::new("Billån", "Plus", 3412),
            FinancingOption::new("Privatleasing", "Plus", 3200),
        ]);
        assert_eq!(options.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_model_with_two_financing_types() {
        let browser = FixtureBrowser::new()
            .with_page(fixtures::EV3_URL, fixtures::EV3_PAGE)
            .with_page(fixtures::EV3_LEASING_URL, fixtures::EV3_LEASING)
            .with_page(fixtures::EV3_LOAN_URL, fixtures::EV3_LOAN);
        let mut fetcher = fetcher(browser);

        let scan = extractor().extract(&mut fetcher, fixtures::EV3_URL).await.unwrap();

        assert_eq!(scan.model.model_name, "Kia EV3");
        assert_eq!(scan.model.model_url, fixtures::EV3_URL);
        assert_eq!(
            scan.model.image_url,
            "https://www.bilhandlare.example/wp-content/uploads/ev3-variant.png"
        );
        assert_eq!(
            scan.model.financing_options,
            vec![
                FinancingOption::new("Privatleasing", "Air", 3200),
                FinancingOption::new("Privatleasing", "GT-Line", 4195),
                FinancingOption::new("Billån", "Air", 2590),
            ]
        );
        assert_eq!(scan.report.types_attempted, 2);
        assert_eq!(scan.report.types_succeeded, 2);
        assert_eq!(scan.report.labels_seen, 7);
        assert_eq!(scan.report.labels_rejected, 2);
    }

    #[tokio::test]
    async fn test_extract_visits_tabs_in_order_and_settles() {
        let browser = FixtureBrowser::new()
            .with_page(fixtures::EV3_URL, fixtures::EV3_PAGE)
            .with_page(fixtures::EV3_LEASING_URL, fixtures::EV3_LEASING)
            .with_page(fixtures::EV3_LOAN_URL, fixtures::EV3_LOAN)
            .with_consent_button("Acceptera alla");
        let mut fetcher = fetcher(browser);

        extractor().extract(&mut fetcher, fixtures::EV3_URL).await.unwrap();

        let browser = fetcher.browser();
        assert_eq!(
            browser.visited,
            vec![fixtures::EV3_URL, fixtures::EV3_LEASING_URL, fixtures::EV3_LOAN_URL]
        );
        assert_eq!(browser.clicked, vec!["Acceptera alla"]);
        // 2 s page settle, 500 ms after consent, 1.5 s per financing tab
        assert_eq!(browser.paused, Duration::from_millis(2000 + 500 + 2 * 1500));
    }

    #[tokio::test]
    async fn test_failed_financing_type_is_skipped() {
        // Loan tab is unreachable
        let browser = FixtureBrowser::new()
            .with_page(fixtures::EV3_URL, fixtures::EV3_PAGE)
            .with_page(fixtures::EV3_LEASING_URL, fixtures::EV3_LEASING);
        let mut fetcher = fetcher(browser);

        let scan = extractor().extract(&mut fetcher, fixtures::EV3_URL).await.unwrap();

        assert_eq!(scan.report.types_attempted, 2);
        assert_eq!(scan.report.types_succeeded, 1);
        assert_eq!(scan.model.financing_options.len(), 2);
        assert!(
            scan.model
                .financing_options
                .iter()
                .all(|o| o.financing_type == "Privatleasing")
        );
    }

    #[tokio::test]
    async fn test_unreachable_model_page_fails() {
        let mut fetcher = fetcher(FixtureBrowser::new());
        let result = extractor().extract(&mut fetcher, fixtures::EV3_URL).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_model_without_financing_types() {
        let browser = FixtureBrowser::new().with_page(fixtures::EV9_URL, fixtures::EV9_PAGE);
        let mut fetcher = fetcher(browser);

        let scan = extractor().extract(&mut fetcher, fixtures::EV9_URL).await.unwrap();

        assert_eq!(scan.model.model_name, "Kia EV9");
        assert!(scan.model.financing_options.is_empty());
        assert_eq!(scan.report, ScanReport::default());
    }
}
