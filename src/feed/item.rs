use crate::parsers::price::PriceFormat;
use crate::results::{FinancingOption, Model, ScrapedModel};
use crate::utils::slugify;

/// Google product taxonomy: Vehicles & Parts > Vehicles
pub const GOOGLE_PRODUCT_CATEGORY: &str = "916";
/// Facebook product category for vehicles
pub const FB_PRODUCT_CATEGORY: &str = "173";
pub const AVAILABILITY: &str = "in stock";
pub const CONDITION: &str = "new";
/// Merchant feeds accept custom_label_0 through custom_label_4
pub const MAX_CUSTOM_LABELS: usize = 5;

/// One `<item>` of the product feed, with unescaped text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
    /// Written as `g:url` when present
    pub url: Option<String>,
    pub brand: String,
    pub image_link: Option<String>,
    /// Price with currency suffix, e.g. `3412 SEK`
    pub price: Option<String>,
    pub custom_labels: Vec<String>,
    pub product_type: Option<String>,
}

impl FeedItem {
    /// Item for a listed model. None if the model lacks an id, name or URL.
    pub fn from_model(model: &Model) -> Option<Self> {
        let id = slugify(&model.id);
        if id.is_empty() || model.name.is_empty() || model.url.is_empty() {
            return None;
        }

        let categories = model.categories.join(", ");
        let description = if model.description.is_empty() {
            format!("{}. Kategorier: {}.", model.name, categories)
        } else {
            format!("{} Kategorier: {}.", model.description, categories)
        };

        let product_type = model
            .categories
            .first()
            .map(|first| format!("Fordon > Nya Bilar > {} > {}", model.brand, first));

        Some(Self {
            id,
            title: model.name.clone(),
            description,
            link: model.url.clone(),
            url: Some(model.url.clone()),
            brand: model.brand.clone(),
            image_link: non_empty(&model.image_url),
            price: None,
            custom_labels: model
                .categories
                .iter()
                .take(MAX_CUSTOM_LABELS)
                .cloned()
                .collect(),
            product_type,
        })
    }

    /// Item for one financing option of a scraped model
    pub fn from_financing(
        model: &ScrapedModel,
        option: &FinancingOption,
        brand: &str,
        format: &PriceFormat,
    ) -> Self {
        let id = slugify(&format!(
            "{}-{}-{}",
            model.model_name, option.package_name, option.financing_type
        ));

        Self {
            id,
            title: format!(
                "{} {} - {}",
                model.model_name, option.package_name, option.financing_type
            ),
            description: format!(
                "{} {}. {} från {} {}.",
                model.model_name,
                option.package_name,
                option.financing_type,
                format.group(option.monthly_price),
                format.unit_suffix
            ),
            link: model.model_url.clone(),
            url: None,
            brand: brand.to_string(),
            image_link: non_empty(&model.image_url),
            price: Some(format.feed_price(option.monthly_price)),
            custom_labels: vec![
                option.financing_type.clone(),
                option.package_name.clone(),
                format!("Månadskostnad: {} kr", option.monthly_price),
            ],
            product_type: None,
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Items for a model feed, skipping incomplete models
pub fn model_items(models: &[Model]) -> Vec<FeedItem> {
    models.iter().filter_map(FeedItem::from_model).collect()
}

/// One item per financing option, models in order
pub fn financing_items(models: &[ScrapedModel], brand: &str, format: &PriceFormat) -> Vec<FeedItem> {
    models
        .iter()
        .flat_map(|model| {
            model
                .financing_options
                .iter()
                .map(move |option| FeedItem::from_financing(model, option, brand, format))
        })
        .collect()
}
