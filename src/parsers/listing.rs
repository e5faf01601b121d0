use crate::utils::{collapse_whitespace, resolve_url};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static CATEGORY: LazyLock<Selector> = LazyLock::new(|| selector("div.cat-wrap[id]"));
static CATEGORY_TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h2.h4"));
static MODEL: LazyLock<Selector> = LazyLock::new(|| selector(".model"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static NAME: LazyLock<Selector> = LazyLock::new(|| selector("h3.h5"));
static ANY_H3: LazyLock<Selector> = LazyLock::new(|| selector("h3"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static IMAGE: LazyLock<Selector> = LazyLock::new(|| selector("img"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector should parse")
}

/// Selector the listing page must contain before it is considered rendered
pub const READY_SELECTOR: &str = ".cat-wrap";

/// One model card as found under one category block.
/// A model listed under several categories yields one entry per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub category: String,
    pub url: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub image_alt: String,
}

/// Parses listing markup into entries, in document order
pub fn parse(html: &str, base_url: &str) -> Vec<ListingEntry> {
    let doc = Html::parse_document(html);
    extract_entries(&doc, base_url)
}

/// Walks every category block and the model cards inside it.
/// Cards without a link are skipped.
pub fn extract_entries(doc: &Html, base_url: &str) -> Vec<ListingEntry> {
    let mut entries = Vec::new();

    for block in doc.select(&CATEGORY) {
        let category = category_name(block);
        let mut cards = 0;

        for card in block.select(&MODEL) {
            if let Some(entry) = parse_card(card, &category, base_url) {
                entries.push(entry);
                cards += 1;
            }
        }

        ::log::debug!("Category {:?}: {} model cards", category, cards);
    }

    entries
}

fn category_name(block: ElementRef) -> String {
    let title = block
        .select(&CATEGORY_TITLE)
        .next()
        .map(|h| collapse_whitespace(&h.text().collect::<String>()))
        .unwrap_or_default();

    if title.is_empty() {
        block.value().attr("id").unwrap_or_default().to_string()
    } else {
        title
    }
}

fn parse_card(card: ElementRef, category: &str, base_url: &str) -> Option<ListingEntry> {
    let href = card
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())?;

    let name = card
        .select(&NAME)
        .next()
        .or_else(|| card.select(&ANY_H3).next())
        .map(text_of)
        .unwrap_or_default();

    let description = card.select(&PARAGRAPH).next().map(text_of).unwrap_or_default();

    let (image_url, image_alt) = match card.select(&IMAGE).next() {
        Some(img) => {
            let attrs = img.value();
            let src = attrs
                .attr("src")
                .filter(|s| !s.trim().is_empty())
                .or_else(|| attrs.attr("data-src"))
                .map(|s| resolve_url(base_url, s.trim()))
                .unwrap_or_default();
            let alt = attrs.attr("alt").map(str::trim).unwrap_or_default();
            (src, alt.to_string())
        }
        None => (String::new(), String::new()),
    };

    Some(ListingEntry {
        category: category.to_string(),
        url: resolve_url(base_url, href),
        name,
        description,
        image_url,
        image_alt,
    })
}

fn text_of(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}
