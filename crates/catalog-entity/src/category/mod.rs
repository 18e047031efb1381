//! Category domain entities.

pub mod filter;
pub mod model;
pub mod slug;
pub mod status;
pub mod tree;

pub use filter::CategoryFilter;
pub use model::{Category, CreateCategory, UpdateCategory};
pub use slug::slugify;
pub use status::CategoryStatus;
pub use tree::{CategoryForest, CategoryNode};
