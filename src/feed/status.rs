//! Static `index.html` summarizing the latest run, published next to the feed.

use crate::feed::xml::escape_xml;
use crate::results::{Model, ScrapedModel};
use chrono::{DateTime, Local};

/// One table row on the status page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub name: String,
    pub detail: String,
    pub description: String,
}

impl StatusRow {
    pub fn from_model(model: &Model) -> Self {
        Self {
            name: model.name.clone(),
            detail: model.categories.join(", "),
            description: model.description.clone(),
        }
    }

    pub fn from_scraped(model: &ScrapedModel) -> Self {
        let mut types: Vec<&str> = Vec::new();
        for option in &model.financing_options {
            if !types.contains(&option.financing_type.as_str()) {
                types.push(&option.financing_type);
            }
        }

        Self {
            name: model.model_name.clone(),
            detail: types.join(", "),
            description: format!("{} finansieringsalternativ", model.financing_options.len()),
        }
    }
}

/// What the status page shows
#[derive(Debug, Clone)]
pub struct StatusPage<'a> {
    pub title: &'a str,
    pub feed_file: &'a str,
    pub detail_heading: &'a str,
    pub rows: Vec<StatusRow>,
    pub item_count: usize,
    pub updated: DateTime<Local>,
}

impl StatusPage<'_> {
    pub fn render(&self) -> String {
        let mut rows = String::new();
        for row in &self.rows {
            rows.push_str(&format!(
                "        <tr>\n          <td><strong>{}</strong></td>\n          <td>{}</td>\n          <td>{}</td>\n        </tr>\n",
                escape_xml(&row.name),
                escape_xml(&row.detail),
                escape_xml(&row.description),
            ));
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <title>{title} Feed</title>
  <meta charset="utf-8">
  <style>
    body {{ font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }}
    .info {{ background: #f0f0f0; padding: 20px; border-radius: 5px; }}
    table {{ width: 100%; border-collapse: collapse; margin: 20px 0; }}
    th, td {{ padding: 10px; text-align: left; border-bottom: 1px solid #ddd; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <div class="info">
    <h2>Feed</h2>
    <p><a href="{feed}">{feed}</a></p>
    <h2>Status</h2>
    <p>Last updated: <strong>{updated}</strong></p>
    <p>Total models: <strong>{models}</strong></p>
    <p>Feed items: <strong>{items}</strong></p>
    <table>
      <thead>
        <tr>
          <th>Model</th>
          <th>{detail}</th>
          <th>Description</th>
        </tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>
  </div>
</body>
</html>
"#,
            title = escape_xml(self.title),
            feed = escape_xml(self.feed_file),
            updated = self.updated.format("%Y-%m-%d %H:%M:%S"),
            models = self.rows.len(),
            items = self.item_count,
            detail = escape_xml(self.detail_heading),
            rows = rows,
        )
    }
}
