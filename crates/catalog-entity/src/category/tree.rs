//! Category tree structures for hierarchical display.
//!
//! These are read-only views derived from the flat collection. Renderers
//! must not mutate them; changes go through the flat store and the forest
//! is rebuilt.

use serde::{Deserialize, Serialize};

use catalog_core::types::CategoryId;

use super::model::Category;

/// A category augmented with its derived children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// The stored record.
    #[serde(flatten)]
    pub category: Category,
    /// Depth level (0 for roots of the built forest).
    pub depth: u32,
    /// Child nodes in source collection order.
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// The node's category id.
    pub fn id(&self) -> &CategoryId {
        &self.category.id
    }

    /// Whether the node has any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// A forest of category trees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryForest {
    /// Top-level nodes.
    pub roots: Vec<CategoryNode>,
    /// Total number of nodes in the forest.
    pub total: u64,
    /// Ids placed at the top level because their parent does not exist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphans: Vec<CategoryId>,
    /// Ids placed at the top level to break a parent cycle.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cycles: Vec<CategoryId>,
}

impl CategoryForest {
    /// Create an empty forest.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Whether construction hit no missing parents and no cycles.
    pub fn is_consistent(&self) -> bool {
        self.orphans.is_empty() && self.cycles.is_empty()
    }

    /// Find a node anywhere in the forest.
    pub fn find(&self, id: &CategoryId) -> Option<&CategoryNode> {
        fn search<'a>(nodes: &'a [CategoryNode], id: &CategoryId) -> Option<&'a CategoryNode> {
            nodes.iter().find_map(|node| {
                if node.id() == id {
                    Some(node)
                } else {
                    search(&node.children, id)
                }
            })
        }
        search(&self.roots, id)
    }

    /// Pre-order walk that only enters a node's children when `descend`
    /// returns true for that node.
    pub fn walk<F>(&self, descend: F) -> Vec<&CategoryNode>
    where
        F: Fn(&CategoryNode) -> bool,
    {
        fn visit<'a, F>(nodes: &'a [CategoryNode], descend: &F, out: &mut Vec<&'a CategoryNode>)
        where
            F: Fn(&CategoryNode) -> bool,
        {
            for node in nodes {
                out.push(node);
                if descend(node) {
                    visit(&node.children, descend, out);
                }
            }
        }

        let mut out = Vec::with_capacity(self.total as usize);
        visit(&self.roots, &descend, &mut out);
        out
    }

    /// Every node in pre-order.
    pub fn iter_all(&self) -> Vec<&CategoryNode> {
        self.walk(|_| true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::category::CreateCategory;

    fn node(name: &str, depth: u32, children: Vec<CategoryNode>) -> CategoryNode {
        let id = CategoryId::new(name).expect("valid id");
        CategoryNode {
            category: Category::from_create(id, CreateCategory::named(name), Utc::now()),
            depth,
            children,
        }
    }

    #[test]
    fn test_descendant_count_spans_all_levels() {
        let forest = CategoryForest {
            roots: vec![
                node(
                    "men",
                    0,
                    vec![node("tops", 1, vec![node("tees", 2, vec![])]), node("jeans", 1, vec![])],
                ),
                node("sale", 0, vec![]),
            ],
            total: 5,
            ..CategoryForest::default()
        };

        let men = forest.find(&CategoryId::new("men").expect("id")).expect("men");
        assert_eq!(men.child_count(), 2);
        assert_eq!(men.descendant_count(), 3);

        let tops = forest.find(&CategoryId::new("tops").expect("id")).expect("tops");
        assert_eq!(tops.descendant_count(), 1);
        assert_eq!(forest.roots[1].descendant_count(), 0);
        assert_eq!(forest.iter_all().len(), 5);
    }
}
