//! Category CRUD operations with hierarchy checks.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use catalog_core::config::catalog::CatalogConfig;
use catalog_core::error::AppError;
use catalog_core::types::CategoryId;
use catalog_entity::category::{Category, CategoryFilter, CreateCategory, UpdateCategory};
use catalog_store::CategoryRepository;

/// Attempts at drawing an unused id before giving up.
const MAX_ID_ATTEMPTS: usize = 8;

/// Manages category mutations against the flat store.
///
/// Parent and cycle checks run inside the repository's checked writes,
/// so they hold across every service sharing the same store.
#[derive(Debug, Clone)]
pub struct CategoryService {
    /// Category repository.
    repo: Arc<dyn CategoryRepository>,
    /// Prefix for generated ids.
    id_prefix: String,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(repo: Arc<dyn CategoryRepository>, config: &CatalogConfig) -> Self {
        Self {
            repo,
            id_prefix: config.id_prefix.clone(),
        }
    }

    /// Gets a category by ID.
    pub fn get(&self, id: &CategoryId) -> Result<Category, AppError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found(format!("Category '{id}' not found")))
    }

    /// Lists categories in store order, optionally filtered.
    pub fn list(&self, filter: &CategoryFilter) -> Result<Vec<Category>, AppError> {
        let categories = self.repo.find_all()?;
        if filter.is_empty() {
            return Ok(categories);
        }
        Ok(categories.into_iter().filter(|c| filter.matches(c)).collect())
    }

    /// Top-level categories, offered as parent choices in forms.
    pub fn parent_options(&self) -> Result<Vec<Category>, AppError> {
        self.repo.find_roots()
    }

    /// Number of stored categories.
    pub fn count(&self) -> Result<u64, AppError> {
        self.repo.count()
    }

    /// Creates a new category.
    pub fn create(&self, input: CreateCategory) -> Result<Category, AppError> {
        if input.name.trim().is_empty() {
            return Err(AppError::validation("Category name cannot be empty"));
        }

        let id = self.fresh_id()?;
        let category = Category::from_create(id, input, Utc::now());
        let category = self.repo.create_checked(&category)?;

        info!(
            category_id = %category.id,
            name = %category.name,
            parent_id = ?category.parent_id,
            "Category created"
        );

        Ok(category)
    }

    /// Applies a partial update to an existing category.
    ///
    /// Re-parenting is rejected when the new parent is the category itself
    /// or one of its descendants.
    pub fn update(&self, id: &CategoryId, changes: UpdateCategory) -> Result<Category, AppError> {
        let current = self.get(id)?;

        if changes.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(AppError::validation("Category name cannot be empty"));
        }

        if changes.is_empty() {
            debug!(category_id = %id, "Empty update ignored");
            return Ok(current);
        }

        let category = self.repo.update_checked(id, &changes, Utc::now())?;

        info!(
            category_id = %category.id,
            parent_id = ?category.parent_id,
            "Category updated"
        );

        Ok(category)
    }

    /// Deletes a category. Its direct children move to the top level.
    ///
    /// Returns the ids of the promoted children.
    pub fn delete(&self, id: &CategoryId) -> Result<Vec<CategoryId>, AppError> {
        let promoted = self
            .repo
            .delete_promoting_children(id)?
            .ok_or_else(|| AppError::not_found(format!("Category '{id}' not found")))?;

        info!(
            category_id = %id,
            promoted = promoted.len(),
            "Category deleted"
        );

        Ok(promoted)
    }

    fn fresh_id(&self) -> Result<CategoryId, AppError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = CategoryId::generate(&self.id_prefix);
            if self.repo.find_by_id(&id)?.is_none() {
                return Ok(id);
            }
        }
        Err(AppError::conflict("Could not allocate a unique category id"))
    }
}
