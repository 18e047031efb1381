//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use catalog_core::types::CategoryId;

use super::slug::slugify;
use super::status::CategoryStatus;

/// A node in the product taxonomy, stored flat.
///
/// Children are never stored on the record; they are derived by the tree
/// builder from `parent_id` links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL-safe identifier derived from the name.
    pub slug: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent category ID (None for top-level categories).
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    /// Storefront visibility.
    #[serde(default)]
    pub status: CategoryStatus,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Number of products filed under this category. Informational only.
    #[serde(default)]
    pub product_count: u32,
    /// SEO title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    /// SEO description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Build a new record from creation input.
    ///
    /// The caller is responsible for validating `input` and supplying a
    /// fresh id.
    pub fn from_create(id: CategoryId, input: CreateCategory, now: DateTime<Utc>) -> Self {
        let name = input.name.trim().to_string();
        let slug = match input.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slugify(slug),
            _ => slugify(&name),
        };

        Self {
            id,
            name,
            slug,
            description: non_blank(input.description),
            parent_id: input.parent_id,
            status: input.status.unwrap_or_default(),
            image: non_blank(input.image),
            product_count: input.product_count.unwrap_or(0),
            meta_title: non_blank(input.meta_title),
            meta_description: non_blank(input.meta_description),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this is a top-level category (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if the category is visible in the storefront.
    pub fn is_active(&self) -> bool {
        self.status == CategoryStatus::Active
    }

    /// Apply a partial update in place and bump `updated_at`.
    ///
    /// Validation (blank names, parent cycles) happens before this is
    /// called. A name change without an explicit slug re-derives the slug.
    pub fn apply(&mut self, changes: &UpdateCategory, now: DateTime<Utc>) {
        let mut rename = false;
        if let Some(name) = &changes.name {
            let name = name.trim();
            rename = name != self.name;
            self.name = name.to_string();
        }

        match changes.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => self.slug = slugify(slug),
            Some(_) => self.slug = slugify(&self.name),
            None if rename => self.slug = slugify(&self.name),
            None => {}
        }

        if let Some(description) = &changes.description {
            self.description = non_blank(Some(description.clone()));
        }
        if let Some(parent_id) = &changes.parent_id {
            self.parent_id = parent_id.clone();
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(image) = &changes.image {
            self.image = non_blank(Some(image.clone()));
        }
        if let Some(product_count) = changes.product_count {
            self.product_count = product_count;
        }
        if let Some(meta_title) = &changes.meta_title {
            self.meta_title = non_blank(Some(meta_title.clone()));
        }
        if let Some(meta_description) = &changes.meta_description {
            self.meta_description = non_blank(Some(meta_description.clone()));
        }

        self.updated_at = now;
    }
}

/// Data required to create a new category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Display name. Required.
    pub name: String,
    /// Explicit slug; derived from `name` when absent or blank.
    #[serde(default)]
    pub slug: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Parent category (None for top level).
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    /// Status; defaults to active.
    #[serde(default)]
    pub status: Option<CategoryStatus>,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Initial product count; defaults to zero.
    #[serde(default)]
    pub product_count: Option<u32>,
    /// SEO title.
    #[serde(default)]
    pub meta_title: Option<String>,
    /// SEO description.
    #[serde(default)]
    pub meta_description: Option<String>,
}

impl CreateCategory {
    /// Creation input with only a name; everything else defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Place the new category under `parent_id`.
    pub fn under(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// A partial update: one optional slot per mutable field.
///
/// `None` leaves a field untouched. Optional text fields are cleared with
/// an empty string; `parent_id` is cleared with `Some(None)` (JSON `null`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategory {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New slug; blank re-derives from the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New parent; `Some(None)` moves the category to the top level.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<Option<CategoryId>>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CategoryStatus>,
    /// New image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// New product count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u32>,
    /// New SEO title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    /// New SEO description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

impl UpdateCategory {
    /// Update that only renames.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Update that only re-parents (`None` = move to top level).
    pub fn reparent(parent_id: Option<CategoryId>) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::default()
        }
    }

    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.parent_id.is_none()
            && self.status.is_none()
            && self.image.is_none()
            && self.product_count.is_none()
            && self.meta_title.is_none()
            && self.meta_description.is_none()
    }
}

/// Distinguish an explicit `null` from an absent field.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}
