//! Newtype wrapper for category identifiers.
//!
//! Seed data uses short hand-written ids (`cat1`), while generated ids
//! take the form `<prefix>-<uuid v7>`, so the wrapper is string-backed
//! rather than a bare [`uuid::Uuid`].

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Unique identifier for a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Wrap an existing identifier. Blank values are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, AppError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AppError::validation("Category id cannot be empty"));
        }
        Ok(Self(id))
    }

    /// Generate a fresh identifier with the given prefix.
    ///
    /// UUID v7 keeps generated ids roughly ordered by creation time.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", Uuid::now_v7().simple()))
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CategoryId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CategoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CategoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<CategoryId> for String {
    fn from(id: CategoryId) -> String {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique_and_prefixed() {
        let a = CategoryId::generate("cat");
        let b = CategoryId::generate("cat");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("cat-"));
        assert_eq!(a.as_str().len(), "cat-".len() + 32);
    }

    #[test]
    fn test_blank_rejected() {
        assert!(CategoryId::new("  ").is_err());
        assert!("".parse::<CategoryId>().is_err());
        assert_eq!("cat1".parse::<CategoryId>().expect("parse").as_str(), "cat1");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = CategoryId::new("cat3").expect("id");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"cat3\"");
    }
}
