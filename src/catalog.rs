use crate::parsers::listing::ListingEntry;
use crate::results::Model;
use crate::utils::last_path_segment;
use std::collections::HashMap;

/// Run-local accumulator of models keyed by URL.
///
/// The first entry for a URL creates the model; later entries for the same
/// URL only contribute their category, and only if the model does not carry
/// it yet. Models come back out in first-seen order.
#[derive(Debug, Default)]
pub struct ModelCatalog {
    brand: String,
    models: Vec<Model>,
    by_url: HashMap<String, usize>,
}

impl ModelCatalog {
    /// Create an empty catalog whose models are stamped with `brand`
    pub fn new(brand: &str) -> Self {
        Self {
            brand: brand.to_string(),
            models: Vec::new(),
            by_url: HashMap::new(),
        }
    }

    /// Merge one listing entry. Returns true if it created a new model.
    pub fn insert(&mut self, entry: ListingEntry) -> bool {
        if let Some(&index) = self.by_url.get(&entry.url) {
            let model = &mut self.models[index];
            if !model.categories.contains(&entry.category) {
                ::log::debug!("{} also listed under {}", model.url, entry.category);
                model.categories.push(entry.category);
            }
            return false;
        }

        let image_alt = if entry.image_alt.is_empty() {
            entry.name.clone()
        } else {
            entry.image_alt
        };

        let model = Model {
            id: last_path_segment(&entry.url),
            name: entry.name,
            description: entry.description,
            url: entry.url.clone(),
            image_url: entry.image_url,
            image_alt,
            categories: vec![entry.category],
            brand: self.brand.clone(),
        };

        self.by_url.insert(entry.url, self.models.len());
        self.models.push(model);
        true
    }

    /// Merge every entry in order
    pub fn extend(&mut self, entries: impl IntoIterator<Item = ListingEntry>) {
        for entry in entries {
            self.insert(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn into_models(self) -> Vec<Model> {
        self.models
    }

    /// Number of models listed under each category, in first-seen category order
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for category in self.models.iter().flat_map(|m| m.categories.iter()) {
            match counts.iter_mut().find(|(name, _)| name == category) {
                Some((_, count)) => *count += 1,
                None => counts.push((category.clone(), 1)),
            }
        }
        counts
    }
}
