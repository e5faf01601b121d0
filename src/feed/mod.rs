//! Feed serialization: items, the RSS/XML writer and the status page.

pub mod item;
pub mod status;
pub mod xml;

pub use item::{FeedItem, financing_items, model_items};
pub use xml::{escape_xml, render};
