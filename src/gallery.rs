//! The portfolio gallery and its category filter.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    title: String,
    category: String,
}

impl GalleryItem {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub(crate) fn default_gallery() -> Vec<GalleryItem> {
        vec![
            GalleryItem::new("French manicure", "nails"),
            GalleryItem::new("Floral nail art", "nails"),
            GalleryItem::new("Spa pedicure", "pedicure"),
            GalleryItem::new("Volume lashes", "lashes"),
            GalleryItem::new("Classic lashes", "lashes"),
        ]
    }
}

/// Which gallery items are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GalleryFilter {
    #[default]
    All,
    Category(String),
}

impl GalleryFilter {
    pub fn matches(&self, item: &GalleryItem) -> bool {
        match self {
            GalleryFilter::All => true,
            GalleryFilter::Category(c) => item.category == *c,
        }
    }
}

impl From<Option<String>> for GalleryFilter {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(c) if c != "all" => GalleryFilter::Category(c),
            _ => GalleryFilter::All,
        }
    }
}

impl Display for GalleryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GalleryFilter::All => f.write_str("all"),
            GalleryFilter::Category(c) => f.write_str(c),
        }
    }
}

/// Every item paired with whether `filter` shows it. Items are never removed, only hidden.
pub fn filter<'a>(items: &'a [GalleryItem], filter: &GalleryFilter) -> Vec<(&'a GalleryItem, bool)> {
    items.iter().map(|item| (item, filter.matches(item))).collect()
}
