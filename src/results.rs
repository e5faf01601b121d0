use serde::{Deserialize, Serialize};

/// One vehicle model listed on the overview page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Last non-empty path segment of the model URL
    pub id: String,

    /// Model name as shown on the listing card
    pub name: String,

    /// Short teaser paragraph (empty if the card has none)
    pub description: String,

    /// Canonical detail-page URL, unique per model
    pub url: String,

    /// Card image (empty if the card has none)
    pub image_url: String,

    pub image_alt: String,

    /// Categories the model was listed under, in first-seen order
    pub categories: Vec<String>,

    pub brand: String,
}

/// A monthly price for one package under one financing type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingOption {
    /// Label of the financing tab the price was read from
    pub financing_type: String,

    /// Trim/package name in front of the price
    pub package_name: String,

    /// SEK per month
    pub monthly_price: u32,
}

impl FinancingOption {
    pub fn new(financing_type: &str, package_name: &str, monthly_price: u32) -> Self {
        Self {
            financing_type: financing_type.to_string(),
            package_name: package_name.to_string(),
            monthly_price,
        }
    }
}

/// A model page together with every financing option found on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedModel {
    pub model_name: String,
    pub model_url: String,
    pub image_url: String,

    /// No two entries share the same (package_name, financing_type)
    pub financing_options: Vec<FinancingOption>,
}
