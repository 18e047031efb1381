//! # catalog-service
//!
//! Business logic for the category hierarchy. Services follow constructor
//! injection: the repository is provided at construction time as an
//! `Arc<dyn CategoryRepository>`, so the same services run against the
//! in-memory store or any other backend.

pub mod browser;
pub mod category;

pub use browser::{CategoryBrowser, VisibleRow};
pub use category::{CategoryService, ExpansionState, TreeService};
