//! In-memory category repository.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_core::types::CategoryId;
use catalog_entity::category::{Category, UpdateCategory};

use crate::repository::CategoryRepository;
use crate::seed;

/// Category repository backed by an ordered `Vec`.
///
/// Reads clone out of a shared lock, so callers always work on a
/// point-in-time snapshot. Each write holds the exclusive lock for its
/// whole duration.
#[derive(Debug, Default)]
pub struct MemoryCategoryRepository {
    /// The flat collection in insertion order.
    categories: RwLock<Vec<Category>>,
}

impl MemoryCategoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `categories`.
    ///
    /// Fails with a conflict if two records share an id.
    pub fn with_categories(categories: Vec<Category>) -> AppResult<Self> {
        let mut seen = HashSet::with_capacity(categories.len());
        for category in &categories {
            if !seen.insert(category.id.clone()) {
                return Err(AppError::conflict(format!(
                    "Duplicate category id '{}'",
                    category.id
                )));
            }
        }

        Ok(Self {
            categories: RwLock::new(categories),
        })
    }

    /// Create a repository pre-loaded with the built-in mock categories.
    pub fn seeded() -> AppResult<Self> {
        let repo = Self::with_categories(seed::mock_categories()?)?;
        debug!(count = repo.count()?, "Seeded category repository");
        Ok(repo)
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<Category>>> {
        self.categories
            .read()
            .map_err(|_| AppError::internal("Category store lock poisoned"))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<Category>>> {
        self.categories
            .write()
            .map_err(|_| AppError::internal("Category store lock poisoned"))
    }
}

impl Repository<Category, CategoryId> for MemoryCategoryRepository {
    fn find_by_id(&self, id: &CategoryId) -> AppResult<Option<Category>> {
        Ok(self.read()?.iter().find(|c| &c.id == id).cloned())
    }

    fn find_all(&self) -> AppResult<Vec<Category>> {
        Ok(self.read()?.clone())
    }

    fn create(&self, entity: &Category) -> AppResult<Category> {
        let mut categories = self.write()?;
        if categories.iter().any(|c| c.id == entity.id) {
            return Err(AppError::conflict(format!(
                "Category '{}' already exists",
                entity.id
            )));
        }
        categories.push(entity.clone());
        Ok(entity.clone())
    }

    fn update(&self, entity: &Category) -> AppResult<Category> {
        let mut categories = self.write()?;
        let slot = categories
            .iter_mut()
            .find(|c| c.id == entity.id)
            .ok_or_else(|| AppError::not_found(format!("Category '{}' not found", entity.id)))?;
        *slot = entity.clone();
        Ok(entity.clone())
    }

    fn delete(&self, id: &CategoryId) -> AppResult<bool> {
        let mut categories = self.write()?;
        let before = categories.len();
        categories.retain(|c| &c.id != id);
        Ok(categories.len() != before)
    }

    fn count(&self) -> AppResult<u64> {
        Ok(self.read()?.len() as u64)
    }
}

impl CategoryRepository for MemoryCategoryRepository {
    fn find_roots(&self) -> AppResult<Vec<Category>> {
        Ok(self
            .read()?
            .iter()
            .filter(|c| c.is_root())
            .cloned()
            .collect())
    }

    fn find_children(&self, parent_id: &CategoryId) -> AppResult<Vec<Category>> {
        Ok(self
            .read()?
            .iter()
            .filter(|c| c.parent_id.as_ref() == Some(parent_id))
            .cloned()
            .collect())
    }

    fn get_ancestry(&self, id: &CategoryId) -> AppResult<Vec<CategoryId>> {
        let categories = self.read()?;
        Ok(ancestry(&categories, id))
    }

    fn create_checked(&self, category: &Category) -> AppResult<Category> {
        let mut categories = self.write()?;
        if categories.iter().any(|c| c.id == category.id) {
            return Err(AppError::conflict(format!(
                "Category '{}' already exists",
                category.id
            )));
        }
        if let Some(parent_id) = &category.parent_id {
            require_parent(&categories, parent_id)?;
        }

        categories.push(category.clone());
        Ok(category.clone())
    }

    fn update_checked(
        &self,
        id: &CategoryId,
        changes: &UpdateCategory,
        now: DateTime<Utc>,
    ) -> AppResult<Category> {
        let mut categories = self.write()?;
        let index = categories
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Category '{id}' not found")))?;

        if let Some(Some(parent_id)) = &changes.parent_id {
            if parent_id == id {
                return Err(AppError::validation("A category cannot be its own parent"));
            }
            require_parent(&categories, parent_id)?;
            if ancestry(&categories, parent_id).contains(id) {
                return Err(AppError::validation(format!(
                    "Cannot move '{id}' under its own descendant '{parent_id}'"
                )));
            }
        }

        let category = &mut categories[index];
        category.apply(changes, now);
        Ok(category.clone())
    }

    fn delete_promoting_children(&self, id: &CategoryId) -> AppResult<Option<Vec<CategoryId>>> {
        let mut categories = self.write()?;
        let Some(index) = categories.iter().position(|c| &c.id == id) else {
            return Ok(None);
        };
        categories.remove(index);

        let now = Utc::now();
        let mut promoted = Vec::new();
        for child in categories
            .iter_mut()
            .filter(|c| c.parent_id.as_ref() == Some(id))
        {
            child.parent_id = None;
            child.updated_at = now;
            promoted.push(child.id.clone());
        }

        Ok(Some(promoted))
    }
}

fn require_parent(categories: &[Category], parent_id: &CategoryId) -> AppResult<()> {
    if categories.iter().any(|c| &c.id == parent_id) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Parent category '{parent_id}' does not exist"
        )))
    }
}

/// Walk parent links from `id` upward. Bounded by the collection size.
fn ancestry(categories: &[Category], id: &CategoryId) -> Vec<CategoryId> {
    let mut chain = Vec::new();
    let mut seen: HashSet<&CategoryId> = HashSet::from([id]);
    let mut current = categories.iter().find(|c| &c.id == id);

    while let Some(parent_id) = current.and_then(|c| c.parent_id.as_ref()) {
        if !seen.insert(parent_id) {
            break;
        }
        let Some(parent) = categories.iter().find(|c| &c.id == parent_id) else {
            break;
        };
        chain.push(parent_id.clone());
        current = Some(parent);
    }

    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_entity::category::CreateCategory;

    fn id(s: &str) -> CategoryId {
        CategoryId::new(s).expect("valid id")
    }

    fn category(s: &str, parent: Option<&str>) -> Category {
        let mut input = CreateCategory::named(s.to_uppercase());
        input.parent_id = parent.map(id);
        Category::from_create(id(s), input, Utc::now())
    }

    #[test]
    fn test_seeded_contents() {
        let repo = MemoryCategoryRepository::seeded().expect("seed");
        assert_eq!(repo.count().expect("count"), 6);

        let roots: Vec<String> = repo
            .find_roots()
            .expect("roots")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(roots, vec!["Men", "Women", "Accessories"]);

        let children = repo.find_children(&id("cat1")).expect("children");
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].id, id("cat3"));
        assert_eq!(children[1].id, id("cat4"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = MemoryCategoryRepository::with_categories(vec![
            category("a", None),
            category("a", None),
        ])
        .expect_err("duplicate");
        assert_eq!(err.kind, catalog_core::error::ErrorKind::Conflict);
    }

    #[test]
    fn test_create_conflict_and_update_missing() {
        let repo = MemoryCategoryRepository::new();
        repo.create(&category("a", None)).expect("create");
        assert!(repo.create(&category("a", None)).is_err());

        let err = repo.update(&category("zzz", None)).expect_err("missing");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_keeps_order() {
        let repo = MemoryCategoryRepository::with_categories(vec![
            category("a", None),
            category("b", None),
            category("c", None),
        ])
        .expect("repo");

        let mut b = repo.find_by_id(&id("b")).expect("find").expect("exists");
        b.name = "Renamed".to_string();
        repo.update(&b).expect("update");

        let names: Vec<String> = repo.find_all().expect("all").into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "Renamed", "C"]);
    }

    #[test]
    fn test_ancestry_nearest_first() {
        let repo = MemoryCategoryRepository::with_categories(vec![
            category("a", None),
            category("b", Some("a")),
            category("c", Some("b")),
        ])
        .expect("repo");

        assert_eq!(repo.get_ancestry(&id("c")).expect("ancestry"), vec![id("b"), id("a")]);
        assert!(repo.get_ancestry(&id("a")).expect("ancestry").is_empty());
        assert!(repo.get_ancestry(&id("missing")).expect("ancestry").is_empty());
    }

    #[test]
    fn test_ancestry_terminates_on_cycle() {
        let repo = MemoryCategoryRepository::with_categories(vec![
            category("a", Some("b")),
            category("b", Some("a")),
        ])
        .expect("repo");

        assert_eq!(repo.get_ancestry(&id("a")).expect("ancestry"), vec![id("b")]);
    }

    #[test]
    fn test_ancestry_stops_at_dangling_parent() {
        let repo = MemoryCategoryRepository::with_categories(vec![category("a", Some("gone"))])
            .expect("repo");
        assert!(repo.get_ancestry(&id("a")).expect("ancestry").is_empty());
    }

    #[test]
    fn test_create_checked_requires_parent() {
        let repo = MemoryCategoryRepository::seeded().expect("seed");

        let err = repo
            .create_checked(&category("x", Some("ghost")))
            .expect_err("unknown parent");
        assert!(err.is_validation());

        repo.create_checked(&category("x", Some("cat1"))).expect("create");
        let err = repo
            .create_checked(&category("x", None))
            .expect_err("duplicate");
        assert_eq!(err.kind, catalog_core::error::ErrorKind::Conflict);
        assert_eq!(repo.count().expect("count"), 7);
    }

    #[test]
    fn test_update_checked_rejects_cycles() {
        let repo = MemoryCategoryRepository::seeded().expect("seed");
        let before = repo.find_all().expect("all");

        for parent in ["cat1", "cat3", "ghost"] {
            let err = repo
                .update_checked(&id("cat1"), &UpdateCategory::reparent(Some(id(parent))), Utc::now())
                .expect_err("rejected");
            assert!(err.is_validation(), "parent {parent}");
        }
        let err = repo
            .update_checked(&id("nope"), &UpdateCategory::rename("X"), Utc::now())
            .expect_err("missing");
        assert!(err.is_not_found());
        assert_eq!(repo.find_all().expect("all"), before);

        let moved = repo
            .update_checked(&id("cat4"), &UpdateCategory::reparent(Some(id("cat2"))), Utc::now())
            .expect("move");
        assert_eq!(moved.parent_id, Some(id("cat2")));
        assert_eq!(repo.find_by_id(&id("cat4")).expect("find"), Some(moved));
    }

    #[test]
    fn test_delete_promotes_children() {
        let repo = MemoryCategoryRepository::seeded().expect("seed");

        let promoted = repo
            .delete_promoting_children(&id("cat1"))
            .expect("delete")
            .expect("existed");
        assert_eq!(promoted, vec![id("cat3"), id("cat4")]);

        let t_shirts = repo.find_by_id(&id("cat3")).expect("find").expect("kept");
        assert!(t_shirts.is_root());
        assert!(repo.find_by_id(&id("cat1")).expect("find").is_none());
        assert_eq!(repo.count().expect("count"), 5);

        assert!(repo.delete_promoting_children(&id("cat1")).expect("delete").is_none());
    }
}
