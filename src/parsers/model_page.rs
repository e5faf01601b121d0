use crate::utils::{collapse_whitespace, resolve_url};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static VARIANT_IMAGE: LazyLock<Selector> = LazyLock::new(|| selector(".img-container img"));
static OG_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[property="og:image"]"#));
static FINANCING_BUTTON: LazyLock<Selector> =
    LazyLock::new(|| selector("button.financing-menu-button[data-location]"));
static LABEL: LazyLock<Selector> = LazyLock::new(|| selector("label"));
static INPUT: LazyLock<Selector> = LazyLock::new(|| selector("input[type]"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector should parse")
}

/// Which images count as a real product picture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRules {
    /// Substring every accepted image URL must contain
    #[serde(default = "default_uploads_marker")]
    pub uploads_marker: String,

    /// Substrings marking generic placeholder images
    #[serde(default = "default_placeholders")]
    pub placeholders: Vec<String>,
}

fn default_uploads_marker() -> String {
    "wp-content/uploads".to_string()
}

fn default_placeholders() -> Vec<String> {
    vec!["elbil.png".to_string()]
}

impl Default for ImageRules {
    fn default() -> Self {
        Self {
            uploads_marker: default_uploads_marker(),
            placeholders: default_placeholders(),
        }
    }
}

impl ImageRules {
    fn is_upload(&self, url: &str) -> bool {
        url.contains(&self.uploads_marker)
    }

    fn is_placeholder(&self, url: &str) -> bool {
        self.placeholders.iter().any(|p| url.contains(p.as_str()))
    }
}

/// Name and picture of the model a detail page is about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelPageInfo {
    pub model_name: String,
    pub image_url: String,
}

/// A financing tab and the URL that renders it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancingTarget {
    pub financing_type: String,
    pub url: String,
}

/// Reads the model name (first h1) and the representative image.
///
/// The variant image inside `.img-container` is preferred when it is an
/// upload and not a placeholder; otherwise the Open Graph image is used if it
/// is an upload; otherwise the image is left empty.
pub fn extract_model_info(doc: &Html, page_url: &str, rules: &ImageRules) -> ModelPageInfo {
    let model_name = doc
        .select(&HEADING)
        .next()
        .map(|h| collapse_whitespace(&h.text().collect::<String>()))
        .unwrap_or_default();

    let variant = doc.select(&VARIANT_IMAGE).next().and_then(|img| {
        let attrs = img.value();
        attrs
            .attr("src")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| attrs.attr("data-src"))
            .map(|s| resolve_url(page_url, s.trim()))
            .filter(|src| rules.is_upload(src) && !rules.is_placeholder(src))
    });

    let image_url = variant
        .or_else(|| {
            doc.select(&OG_IMAGE)
                .next()
                .and_then(|meta| meta.value().attr("content"))
                .map(|s| s.trim().to_string())
                .filter(|src| rules.is_upload(src))
        })
        .unwrap_or_default();

    ModelPageInfo {
        model_name,
        image_url,
    }
}

/// Lists the financing tab buttons with their direct target URLs
pub fn extract_financing_targets(doc: &Html, page_url: &str) -> Vec<FinancingTarget> {
    doc.select(&FINANCING_BUTTON)
        .filter_map(|button| {
            let location = button.value().attr("data-location")?.trim();
            if location.is_empty() {
                return None;
            }
            Some(FinancingTarget {
                financing_type: collapse_whitespace(&button.text().collect::<String>()),
                url: resolve_url(page_url, location),
            })
        })
        .collect()
}

/// Text of every label bound to a radio button, in document order.
///
/// Covers both `<input type="radio"><label>…</label>` and labels wrapping
/// their input. Each label is returned once.
pub fn extract_radio_labels(doc: &Html) -> Vec<String> {
    doc.select(&LABEL)
        .filter(|label| wraps_radio(*label) || follows_radio(*label))
        .map(|label| label.text().collect::<String>().trim().to_string())
        .collect()
}

fn is_radio(element: ElementRef) -> bool {
    element.value().name() == "input"
        && element
            .value()
            .attr("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("radio"))
}

fn wraps_radio(label: ElementRef) -> bool {
    label.select(&INPUT).any(is_radio)
}

fn follows_radio(label: ElementRef) -> bool {
    label
        .prev_siblings()
        .find_map(ElementRef::wrap)
        .is_some_and(is_radio)
}
