use regex::Regex;
use serde::{Deserialize, Serialize};

/// Configuration for telling real packages apart from noise on financing tabs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageFilterConfig {
    /// Prices at or below this are treated as mis-parsed fragments
    #[serde(default = "default_min_price")]
    pub min_price: u32,

    /// Add-on accessories priced per month (matched case-insensitively)
    #[serde(default = "default_accessory_keywords")]
    pub accessory_keywords: Vec<String>,

    /// Phrases that only appear in pricing notes and disclaimers
    #[serde(default = "default_disclaimer_markers")]
    pub disclaimer_markers: Vec<String>,
}

fn default_min_price() -> u32 {
    1000
}

fn default_accessory_keywords() -> Vec<String> {
    vec![
        "dragkrok".to_string(),
        "vinterhjul".to_string(),
        "led-ramp".to_string(),
    ]
}

fn default_disclaimer_markers() -> Vec<String> {
    vec!["privatleasing".to_string(), "mil/år".to_string()]
}

impl Default for PackageFilterConfig {
    fn default() -> Self {
        Self {
            min_price: default_min_price(),
            accessory_keywords: default_accessory_keywords(),
            disclaimer_markers: default_disclaimer_markers(),
        }
    }
}

/// Why a parsed label was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Name starts with `+`
    AddOn,
    /// Name mentions an accessory
    Accessory,
    /// Name is a pricing note rather than a package
    PricingNote,
    /// Price is not above the sanity floor
    BelowFloor,
}

/// Filter applied to every (package, price) pair read off a financing tab
#[derive(Debug)]
pub struct PackageFilter {
    config: PackageFilterConfig,
    accessory_regexes: Vec<Regex>,
    disclaimer_regexes: Vec<Regex>,
}

impl Default for PackageFilter {
    fn default() -> Self {
        Self::new(PackageFilterConfig::default()).expect("Default keyword patterns should be valid")
    }
}

impl PackageFilter {
    /// Create a new package filter from configuration
    pub fn new(config: PackageFilterConfig) -> Result<Self, regex::Error> {
        let accessory_regexes = compile_keywords(&config.accessory_keywords)?;
        let disclaimer_regexes = compile_keywords(&config.disclaimer_markers)?;

        Ok(Self {
            config,
            accessory_regexes,
            disclaimer_regexes,
        })
    }

    /// Decide whether a package/price pair is kept.
    /// Add-on, accessory and pricing-note checks run before the price floor.
    pub fn check(&self, package_name: &str, monthly_price: u32) -> Result<(), Rejection> {
        if package_name.starts_with('+') {
            return Err(Rejection::AddOn);
        }

        if self.accessory_regexes.iter().any(|r| r.is_match(package_name)) {
            return Err(Rejection::Accessory);
        }

        if self.disclaimer_regexes.iter().any(|r| r.is_match(package_name)) {
            return Err(Rejection::PricingNote);
        }

        if monthly_price <= self.config.min_price {
            return Err(Rejection::BelowFloor);
        }

        Ok(())
    }
}

/// Each keyword becomes a literal, case-insensitive substring match
fn compile_keywords(keywords: &[String]) -> Result<Vec<Regex>, regex::Error> {
    let mut regexes = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        regexes.push(Regex::new(&format!("(?i){}", regex::escape(keyword)))?);
    }
    Ok(regexes)
}
