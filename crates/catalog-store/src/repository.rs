//! Category-specific repository trait.

use chrono::{DateTime, Utc};

use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_core::types::CategoryId;
use catalog_entity::category::{Category, UpdateCategory};

/// Repository for the flat category collection.
///
/// `find_all` returns records in insertion order, which is the sibling
/// order of the derived tree.
///
/// The `*_checked` mutations and `delete_promoting_children` validate and
/// write under one exclusive lock, so every caller sharing the store sees
/// them as a single step.
pub trait CategoryRepository: Repository<Category, CategoryId> + std::fmt::Debug {
    /// Categories without a parent, in storage order.
    fn find_roots(&self) -> AppResult<Vec<Category>>;

    /// Direct children of `parent_id`, in storage order.
    fn find_children(&self, parent_id: &CategoryId) -> AppResult<Vec<Category>>;

    /// Ancestor ids of `id`, nearest first.
    ///
    /// Stops at a root, at a dangling parent reference, or when a cycle
    /// would revisit an id. Returns an empty list for unknown ids.
    fn get_ancestry(&self, id: &CategoryId) -> AppResult<Vec<CategoryId>>;

    /// Insert `category`, failing with a validation error if its parent
    /// does not exist and a conflict if its id is taken.
    fn create_checked(&self, category: &Category) -> AppResult<Category>;

    /// Apply `changes` to `id` and bump `updated_at` to `now`.
    ///
    /// Fails with not-found for an unknown `id`, and with a validation
    /// error when the new parent is `id` itself, does not exist, or is a
    /// descendant of `id`. A failed call leaves the store unchanged.
    fn update_checked(
        &self,
        id: &CategoryId,
        changes: &UpdateCategory,
        now: DateTime<Utc>,
    ) -> AppResult<Category>;

    /// Delete `id` and move its direct children to the top level in one
    /// step. Returns the promoted child ids, or `None` if `id` was absent.
    fn delete_promoting_children(&self, id: &CategoryId) -> AppResult<Option<Vec<CategoryId>>>;
}
