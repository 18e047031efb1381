//! Per-view record of which categories are expanded.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use catalog_core::types::CategoryId;
use catalog_entity::category::{CategoryForest, CategoryNode};

/// Set of expanded category ids.
///
/// Presentation state only. It never touches the store, and ids that no
/// longer exist are simply ignored when rendering. A fresh state has
/// everything collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    expanded: HashSet<CategoryId>,
}

impl ExpansionState {
    /// Create a state with everything collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the expansion flag of `id`. Returns the new flag.
    pub fn toggle(&mut self, id: &CategoryId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Whether `id` is currently expanded.
    pub fn is_expanded(&self, id: &CategoryId) -> bool {
        self.expanded.contains(id)
    }

    /// Mark `id` as expanded.
    pub fn expand(&mut self, id: &CategoryId) {
        self.expanded.insert(id.clone());
    }

    /// Mark `id` as collapsed.
    pub fn collapse(&mut self, id: &CategoryId) {
        self.expanded.remove(id);
    }

    /// Expand `id` and every ancestor so the node's children become
    /// visible from the top level.
    pub fn reveal<I>(&mut self, id: &CategoryId, ancestors: I)
    where
        I: IntoIterator<Item = CategoryId>,
    {
        self.expanded.extend(ancestors);
        self.expanded.insert(id.clone());
    }

    /// Expand every node of `forest` that has children.
    pub fn expand_all(&mut self, forest: &CategoryForest) {
        self.expanded.extend(
            forest
                .iter_all()
                .into_iter()
                .filter(|node| node.has_children())
                .map(|node| node.id().clone()),
        );
    }

    /// Collapse everything.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expanded ids in sorted order.
    pub fn expanded_ids(&self) -> Vec<CategoryId> {
        let mut ids: Vec<CategoryId> = self.expanded.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of expanded ids.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Whether nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Nodes a renderer should draw, in pre-order.
    ///
    /// Top-level nodes are always shown; a node's children are shown only
    /// while the node itself is expanded.
    pub fn visible<'a>(&self, forest: &'a CategoryForest) -> Vec<&'a CategoryNode> {
        forest.walk(|node| self.is_expanded(node.id()))
    }
}
