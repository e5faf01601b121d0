//! Pure extraction functions over rendered page markup.
//!
//! Every function here takes an already parsed [`scraper::Html`] (or raw
//! markup) and returns plain data, so they can run against fixtures without a
//! browser.

pub mod listing;
pub mod model_page;
pub mod price;

#[cfg(test)]
mod tests;
