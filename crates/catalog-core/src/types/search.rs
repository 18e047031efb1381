//! Case-insensitive substring search over display text.

use serde::{Deserialize, Serialize};

/// A normalized search term.
///
/// An empty or whitespace-only term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextSearch(String);

impl TextSearch {
    /// Create a search from raw user input.
    pub fn new(term: impl AsRef<str>) -> Self {
        Self(term.as_ref().trim().to_lowercase())
    }

    /// Whether the search matches everything.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The normalized term.
    pub fn term(&self) -> &str {
        &self.0
    }

    /// Whether any of the given fields contains the term.
    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
        if self.is_empty() {
            return true;
        }
        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&self.0))
    }
}
