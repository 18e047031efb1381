//! Category tree building and ancestry resolution.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::warn;

use catalog_core::error::AppError;
use catalog_core::types::CategoryId;
use catalog_entity::category::{Category, CategoryFilter, CategoryForest, CategoryNode};
use catalog_store::CategoryRepository;

/// Builds category forests and resolves breadcrumbs.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Category repository.
    repo: Arc<dyn CategoryRepository>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Builds the full forest from a snapshot of the store.
    pub fn build_forest(&self) -> Result<CategoryForest, AppError> {
        let categories = self.repo.find_all()?;
        let forest = Self::assemble(&categories, None);

        if !forest.is_consistent() {
            warn!(
                orphans = ?forest.orphans,
                cycles = ?forest.cycles,
                "Category hierarchy is inconsistent; affected categories shown at top level"
            );
        }

        Ok(forest)
    }

    /// Builds the forest below `parent_id`.
    pub fn build_subtree(&self, parent_id: &CategoryId) -> Result<CategoryForest, AppError> {
        let categories = self.repo.find_all()?;
        if !categories.iter().any(|c| &c.id == parent_id) {
            return Err(AppError::not_found(format!(
                "Category '{parent_id}' not found"
            )));
        }
        Ok(Self::assemble(&categories, Some(parent_id)))
    }

    /// Builds a forest over the categories that pass `filter`.
    ///
    /// A match whose parent was filtered out is shown at the top level.
    pub fn search_tree(&self, filter: &CategoryFilter) -> Result<CategoryForest, AppError> {
        if filter.is_empty() {
            return self.build_forest();
        }

        let matches: Vec<Category> = self
            .repo
            .find_all()?
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect();

        Ok(Self::assemble(&matches, None))
    }

    /// Gets the breadcrumb trail from a root down to `id`, inclusive.
    pub fn get_breadcrumbs(&self, id: &CategoryId) -> Result<Vec<Category>, AppError> {
        let categories = self.repo.find_all()?;
        let by_id: HashMap<&CategoryId, &Category> =
            categories.iter().map(|c| (&c.id, c)).collect();

        let target = by_id
            .get(id)
            .copied()
            .ok_or_else(|| AppError::not_found(format!("Category '{id}' not found")))?;

        let ancestry = self.repo.get_ancestry(id)?;
        let mut breadcrumbs: Vec<Category> = ancestry
            .iter()
            .rev()
            .filter_map(|ancestor| by_id.get(ancestor).map(|c| (*c).clone()))
            .collect();
        breadcrumbs.push(target.clone());

        Ok(breadcrumbs)
    }

    /// Ancestor ids of `id`, nearest first.
    pub fn get_ancestry(&self, id: &CategoryId) -> Result<Vec<CategoryId>, AppError> {
        self.repo.get_ancestry(id)
    }

    /// Turns a flat list into a forest.
    ///
    /// With `parent = None` the top level holds every category without a
    /// parent plus every category whose parent is missing (recorded in
    /// `orphans`). Anything still unplaced sits on or below a parent
    /// cycle; the cycle is broken at its first member in list order, which
    /// becomes an extra root (recorded in `cycles`).
    ///
    /// With `parent = Some(id)` only the descendants of `id` are built.
    ///
    /// Children are grouped by parent once, so the build is linear in the
    /// number of categories. Every category appears at most once and
    /// siblings keep their list order.
    pub fn assemble(categories: &[Category], parent: Option<&CategoryId>) -> CategoryForest {
        let mut assembler = Assembler::new(categories);
        let mut forest = CategoryForest::empty();

        match parent {
            Some(parent_id) => {
                if let Some(&index) = assembler.index.get(parent_id) {
                    assembler.visited[index] = true;
                }
                for child in assembler.children_of(parent_id) {
                    if !assembler.visited[child] {
                        forest.roots.push(assembler.attach(child, 0));
                    }
                }
            }
            None => {
                for (i, category) in categories.iter().enumerate() {
                    if assembler.visited[i] {
                        continue;
                    }
                    match &category.parent_id {
                        None => forest.roots.push(assembler.attach(i, 0)),
                        Some(parent_id) if !assembler.index.contains_key(parent_id) => {
                            forest.orphans.push(category.id.clone());
                            forest.roots.push(assembler.attach(i, 0));
                        }
                        Some(_) => {}
                    }
                }

                for i in 0..categories.len() {
                    if assembler.visited[i] {
                        continue;
                    }
                    let entry = assembler.cycle_entry(i);
                    forest.cycles.push(categories[entry].id.clone());
                    forest.roots.push(assembler.attach(entry, 0));
                }
            }
        }

        forest.total = assembler.placed;
        forest
    }
}

/// Scratch state for one forest build.
struct Assembler<'a> {
    categories: &'a [Category],
    index: HashMap<&'a CategoryId, usize>,
    children: HashMap<&'a CategoryId, Vec<usize>>,
    visited: Vec<bool>,
    placed: u64,
}

impl<'a> Assembler<'a> {
    fn new(categories: &'a [Category]) -> Self {
        let mut index = HashMap::with_capacity(categories.len());
        let mut children: HashMap<&CategoryId, Vec<usize>> = HashMap::new();

        for (i, category) in categories.iter().enumerate() {
            index.entry(&category.id).or_insert(i);
            if let Some(parent_id) = &category.parent_id {
                children.entry(parent_id).or_default().push(i);
            }
        }

        Self {
            categories,
            index,
            children,
            visited: vec![false; categories.len()],
            placed: 0,
        }
    }

    fn children_of(&self, id: &CategoryId) -> Vec<usize> {
        self.children.get(id).cloned().unwrap_or_default()
    }

    fn attach(&mut self, i: usize, depth: u32) -> CategoryNode {
        self.visited[i] = true;
        self.placed += 1;

        let categories = self.categories;
        let mut children = Vec::new();
        for child in self.children_of(&categories[i].id) {
            if !self.visited[child] {
                children.push(self.attach(child, depth + 1));
            }
        }

        CategoryNode {
            category: categories[i].clone(),
            depth,
            children,
        }
    }

    /// Follow parent links up from an unplaced category until one repeats.
    fn cycle_entry(&self, start: usize) -> usize {
        let mut seen = HashSet::new();
        let mut current = start;

        while seen.insert(current) {
            let parent = self.categories[current]
                .parent_id
                .as_ref()
                .and_then(|p| self.index.get(p));
            match parent {
                Some(&next) if !self.visited[next] => current = next,
                _ => return current,
            }
        }

        current
    }
}
