//! Interactive browsing session over the category hierarchy.
//!
//! A [`CategoryBrowser`] owns the presentation state of one view: which
//! nodes are expanded, which one is selected, and the active search. The
//! forest itself is rebuilt from the store on every read, so mutations
//! made through the browser (or anyone else) show up immediately.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use catalog_core::config::catalog::CatalogConfig;
use catalog_core::error::AppError;
use catalog_core::types::{CategoryId, TextSearch};
use catalog_entity::category::{
    Category, CategoryFilter, CategoryForest, CategoryStatus, CreateCategory, UpdateCategory,
};
use catalog_store::CategoryRepository;

use crate::category::{CategoryService, ExpansionState, TreeService};

/// One line of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleRow {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Storefront visibility.
    pub status: CategoryStatus,
    /// Informational product count.
    pub product_count: u32,
    /// Indentation level.
    pub depth: u32,
    /// Whether the node can be expanded.
    pub has_children: bool,
    /// Whether the node is currently expanded.
    pub expanded: bool,
    /// Whether the node is the current selection.
    pub selected: bool,
}

/// Presentation state for one category view.
#[derive(Debug, Clone)]
pub struct CategoryBrowser {
    categories: CategoryService,
    trees: TreeService,
    expansion: ExpansionState,
    selected: Option<CategoryId>,
    filter: CategoryFilter,
}

impl CategoryBrowser {
    /// Open a view over `repo`. Everything starts collapsed unless
    /// `expand_all_on_open` is set.
    pub fn open(repo: Arc<dyn CategoryRepository>, config: &CatalogConfig) -> Result<Self, AppError> {
        let mut browser = Self {
            categories: CategoryService::new(repo.clone(), config),
            trees: TreeService::new(repo),
            expansion: ExpansionState::new(),
            selected: None,
            filter: CategoryFilter::default(),
        };

        if config.expand_all_on_open {
            browser.expand_all()?;
        }

        Ok(browser)
    }

    /// The mutation service backing this view.
    pub fn categories(&self) -> &CategoryService {
        &self.categories
    }

    /// The tree service backing this view.
    pub fn trees(&self) -> &TreeService {
        &self.trees
    }

    /// Current expansion state.
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Currently selected category, if any.
    pub fn selected(&self) -> Option<&CategoryId> {
        self.selected.as_ref()
    }

    /// Active list filter.
    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// The forest the view is currently showing.
    pub fn forest(&self) -> Result<CategoryForest, AppError> {
        self.trees.search_tree(&self.filter)
    }

    /// Rows to draw, in display order.
    ///
    /// While a search is active every match is shown regardless of
    /// expansion, so hits below collapsed parents are not hidden.
    pub fn visible_rows(&self) -> Result<Vec<VisibleRow>, AppError> {
        let forest = self.forest()?;
        let searching = !self.filter.is_empty();

        let nodes = if searching {
            forest.iter_all()
        } else {
            self.expansion.visible(&forest)
        };

        Ok(nodes
            .into_iter()
            .map(|node| VisibleRow {
                id: node.id().clone(),
                name: node.category.name.clone(),
                status: node.category.status,
                product_count: node.category.product_count,
                depth: node.depth,
                has_children: node.has_children(),
                expanded: self.expansion.is_expanded(node.id()),
                selected: self.selected.as_ref() == Some(node.id()),
            })
            .collect())
    }

    /// Replace the active search. A blank term clears it.
    pub fn set_search(&mut self, term: impl AsRef<str>) {
        self.filter.search = TextSearch::new(term);
        debug!(term = self.filter.search.term(), "Search changed");
    }

    /// Restrict the view to one status, or lift the restriction.
    pub fn set_status_filter(&mut self, status: Option<CategoryStatus>) {
        self.filter.status = status;
    }

    /// Flip the expansion of `id`. Returns the new flag.
    pub fn toggle(&mut self, id: &CategoryId) -> bool {
        self.expansion.toggle(id)
    }

    /// Whether `id` is currently expanded.
    pub fn is_expanded(&self, id: &CategoryId) -> bool {
        self.expansion.is_expanded(id)
    }

    /// Expand every category that has children.
    pub fn expand_all(&mut self) -> Result<(), AppError> {
        let forest = self.trees.build_forest()?;
        self.expansion.expand_all(&forest);
        Ok(())
    }

    /// Collapse every category.
    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }

    /// Select `id` and expand the path down to it.
    pub fn select(&mut self, id: &CategoryId) -> Result<Category, AppError> {
        let category = self.categories.get(id)?;
        let ancestry = self.trees.get_ancestry(id)?;
        self.expansion.reveal(id, ancestry);
        self.selected = Some(id.clone());
        Ok(category)
    }

    /// Drop the current selection without touching expansion.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Create a category and select it.
    pub fn create(&mut self, input: CreateCategory) -> Result<Category, AppError> {
        let category = self.categories.create(input)?;
        self.select(&category.id)?;
        Ok(category)
    }

    /// Apply a partial update to a category.
    pub fn update(&mut self, id: &CategoryId, changes: UpdateCategory) -> Result<Category, AppError> {
        self.categories.update(id, changes)
    }

    /// Delete a category, dropping it from the view state.
    ///
    /// Returns the ids of the children that moved to the top level.
    pub fn delete(&mut self, id: &CategoryId) -> Result<Vec<CategoryId>, AppError> {
        let promoted = self.categories.delete(id)?;
        self.expansion.collapse(id);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Ok(promoted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_store::MemoryCategoryRepository;

    fn id(s: &str) -> CategoryId {
        CategoryId::new(s).expect("valid id")
    }

    fn seeded(config: &CatalogConfig) -> CategoryBrowser {
        let repo = Arc::new(MemoryCategoryRepository::seeded().expect("seed"));
        CategoryBrowser::open(repo, config).expect("open")
    }

    fn row_ids(browser: &CategoryBrowser) -> Vec<String> {
        browser
            .visible_rows()
            .expect("rows")
            .into_iter()
            .map(|row| row.id.to_string())
            .collect()
    }

    #[test]
    fn test_opens_collapsed() {
        let browser = seeded(&CatalogConfig::default());
        assert_eq!(row_ids(&browser), vec!["cat1", "cat2", "cat6"]);
        assert!(browser.selected().is_none());
    }

    #[test]
    fn test_opens_expanded_when_configured() {
        let config = CatalogConfig {
            expand_all_on_open: true,
            ..CatalogConfig::default()
        };
        let browser = seeded(&config);
        assert_eq!(
            row_ids(&browser),
            vec!["cat1", "cat3", "cat4", "cat2", "cat5", "cat6"]
        );
    }

    #[test]
    fn test_toggle_reveals_children() {
        let mut browser = seeded(&CatalogConfig::default());
        assert!(browser.toggle(&id("cat2")));

        let rows = browser.visible_rows().expect("rows");
        let dresses = rows.iter().find(|r| r.id == id("cat5")).expect("visible");
        assert_eq!(dresses.depth, 1);
        assert!(!dresses.has_children);
        assert!(rows.iter().find(|r| r.id == id("cat2")).expect("row").expanded);
    }

    #[test]
    fn test_deep_selection_expands_ancestors() {
        let mut browser = seeded(&CatalogConfig::default());
        let socks = browser
            .create(CreateCategory::named("Socks").under(id("cat3")))
            .expect("create");

        browser.collapse_all();
        browser.select(&socks.id).expect("select");

        assert!(browser.is_expanded(&id("cat1")));
        assert!(browser.is_expanded(&id("cat3")));
        let rows = browser.visible_rows().expect("rows");
        let row = rows.iter().find(|r| r.id == socks.id).expect("visible");
        assert_eq!(row.depth, 2);
        assert!(row.selected);
    }

    #[test]
    fn test_select_missing() {
        let mut browser = seeded(&CatalogConfig::default());
        let err = browser.select(&id("ghost")).expect_err("missing");
        assert!(err.is_not_found());
        assert!(browser.selected().is_none());
    }

    #[test]
    fn test_search_shows_matches_below_collapsed_parents() {
        let mut browser = seeded(&CatalogConfig::default());
        browser.set_search("dress");
        assert_eq!(row_ids(&browser), vec!["cat5"]);

        browser.set_search("");
        assert_eq!(row_ids(&browser), vec!["cat1", "cat2", "cat6"]);
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut browser = seeded(&CatalogConfig::default());
        browser.select(&id("cat1")).expect("select");

        let promoted = browser.delete(&id("cat1")).expect("delete");
        assert_eq!(promoted.len(), 2);
        assert!(browser.selected().is_none());
        assert!(!browser.is_expanded(&id("cat1")));
        assert_eq!(row_ids(&browser), vec!["cat2", "cat3", "cat4", "cat6"]);
    }

    #[test]
    fn test_update_visible_after_rebuild() {
        let mut browser = seeded(&CatalogConfig::default());
        browser
            .update(&id("cat6"), UpdateCategory::reparent(Some(id("cat2"))))
            .expect("move");
        browser.toggle(&id("cat2"));
        assert_eq!(row_ids(&browser), vec!["cat1", "cat2", "cat5", "cat6"]);
    }
}
