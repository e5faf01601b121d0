use crate::config::ChannelInfo;
use crate::feed::item::{
    AVAILABILITY, CONDITION, FB_PRODUCT_CATEGORY, FeedItem, GOOGLE_PRODUCT_CATEGORY,
    MAX_CUSTOM_LABELS,
};
use std::fmt::Write;

/// Replace the five XML special characters with their entities
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the RSS 2.0 feed with the Google Merchant `g:` namespace.
/// Items are written in the order given.
pub fn render(channel: &ChannelInfo, items: &[FeedItem]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<rss version=\"2.0\" xmlns:g=\"http://base.google.com/ns/1.0\">\n");
    xml.push_str("  <channel>\n");
    element(&mut xml, 4, "title", &channel.title);
    element(&mut xml, 4, "link", &channel.link);
    element(&mut xml, 4, "description", &channel.description);

    for item in items {
        render_item(&mut xml, item);
    }

    xml.push_str("  </channel>\n");
    xml.push_str("</rss>\n");
    xml
}

fn render_item(xml: &mut String, item: &FeedItem) {
    xml.push_str("    <item>\n");
    element(xml, 6, "g:google_product_category", GOOGLE_PRODUCT_CATEGORY);
    element(xml, 6, "g:fb_product_category", FB_PRODUCT_CATEGORY);
    element(xml, 6, "g:id", &item.id);
    element(xml, 6, "title", &item.title);
    element(xml, 6, "description", &item.description);
    element(xml, 6, "link", &item.link);
    if let Some(url) = &item.url {
        element(xml, 6, "g:url", url);
    }
    element(xml, 6, "g:brand", &item.brand);
    if let Some(image) = &item.image_link {
        element(xml, 6, "g:image_link", image);
    }
    if let Some(price) = &item.price {
        element(xml, 6, "g:price", price);
    }
    for (i, label) in item.custom_labels.iter().take(MAX_CUSTOM_LABELS).enumerate() {
        element(xml, 6, &format!("g:custom_label_{}", i), label);
    }
    if let Some(product_type) = &item.product_type {
        element(xml, 6, "g:product_type", product_type);
    }
    element(xml, 6, "g:availability", AVAILABILITY);
    element(xml, 6, "g:condition", CONDITION);
    xml.push_str("    </item>\n");
}

fn element(xml: &mut String, indent: usize, name: &str, text: &str) {
    // Writing into a String cannot fail
    let _ = writeln!(
        xml,
        "{:indent$}<{name}>{}</{name}>",
        "",
        escape_xml(text),
        indent = indent,
        name = name
    );
}
