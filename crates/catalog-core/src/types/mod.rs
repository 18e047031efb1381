//! Core type definitions used across the catalog workspace.

pub mod id;
pub mod search;

pub use id::CategoryId;
pub use search::TextSearch;
