//! Price-label parsing.
//!
//! Financing tabs render each package as a radio label such as
//! `Plus FWD Long Range 3 412 kr/mån`: a package name, a space-grouped
//! number and a unit suffix. How the number is grouped and which suffix
//! follows it is described by a [`PriceFormat`], so another locale is a
//! different format value rather than different parsing code.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Number formatting used by the dealer site for monthly prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFormat {
    /// Locale the format describes, informational only
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Thousands separator inside the digit group
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,

    /// Unit phrase right after the number
    #[serde(default = "default_unit_suffix")]
    pub unit_suffix: String,

    /// ISO currency code appended to feed prices
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

fn default_locale() -> String {
    "sv-SE".to_string()
}

fn default_thousands_separator() -> char {
    ' '
}

fn default_unit_suffix() -> String {
    "kr/mån".to_string()
}

fn default_currency_code() -> String {
    "SEK".to_string()
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            thousands_separator: default_thousands_separator(),
            unit_suffix: default_unit_suffix(),
            currency_code: default_currency_code(),
        }
    }
}

impl PriceFormat {
    /// Formats a whole amount with this format's thousands separator (3412 -> "3 412")
    pub fn group(&self, amount: u32) -> String {
        let digits = amount.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.thousands_separator);
            }
            out.push(c);
        }
        out
    }

    /// Amount followed by the currency code, as the feed's price field wants it
    pub fn feed_price(&self, amount: u32) -> String {
        format!("{} {}", amount, self.currency_code)
    }
}

/// A label that matched the price pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLabel {
    pub package_name: String,
    pub monthly_price: u32,
}

/// Compiled matcher for one [`PriceFormat`]
#[derive(Debug, Clone)]
pub struct LabelParser {
    format: PriceFormat,
    pattern: Regex,
}

impl Default for LabelParser {
    fn default() -> Self {
        Self::new(PriceFormat::default()).expect("default price pattern should be valid")
    }
}

impl LabelParser {
    /// Build the label pattern `^(.+?)\s+(\d[\s\d<sep>]+)\s*<suffix>` for a format
    pub fn new(format: PriceFormat) -> Result<Self, regex::Error> {
        let separator = regex::escape(&format.thousands_separator.to_string());
        let suffix = regex::escape(&format.unit_suffix);
        let pattern = Regex::new(&format!(r"^(.+?)\s+(\d[\s\d{separator}]+)\s*{suffix}"))?;
        Ok(Self { format, pattern })
    }

    pub fn format(&self) -> &PriceFormat {
        &self.format
    }

    /// Parses a label into package name and monthly price.
    /// Returns None when the label does not look like a price.
    pub fn parse(&self, label: &str) -> Option<PriceLabel> {
        let caps = self.pattern.captures(label.trim())?;
        let package_name = caps.get(1)?.as_str().trim();

        let digits: String = caps
            .get(2)?
            .as_str()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let monthly_price = digits.parse::<u32>().ok()?;

        if package_name.is_empty() {
            return None;
        }

        Some(PriceLabel {
            package_name: package_name.to_string(),
            monthly_price,
        })
    }
}
