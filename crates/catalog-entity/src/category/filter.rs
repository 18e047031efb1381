//! List filtering for categories.

use serde::{Deserialize, Serialize};

use catalog_core::types::TextSearch;

use super::model::Category;
use super::status::CategoryStatus;

/// Filter applied to the flat category list before display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryFilter {
    /// Case-insensitive match against name and description.
    #[serde(default)]
    pub search: TextSearch,
    /// Only categories with this status.
    #[serde(default)]
    pub status: Option<CategoryStatus>,
}

impl CategoryFilter {
    /// Filter by search term only.
    pub fn search(term: impl AsRef<str>) -> Self {
        Self {
            search: TextSearch::new(term),
            status: None,
        }
    }

    /// Restrict to a status.
    pub fn with_status(mut self, status: CategoryStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether the filter lets everything through.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.status.is_none()
    }

    /// Whether `category` passes the filter.
    pub fn matches(&self, category: &Category) -> bool {
        if self.status.is_some_and(|status| status != category.status) {
            return false;
        }
        self.search
            .matches_any([Some(category.name.as_str()), category.description.as_deref()])
    }
}
