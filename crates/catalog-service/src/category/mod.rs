//! Category mutation, tree, and expansion services.

pub mod expansion;
pub mod service;
pub mod tree;

pub use expansion::ExpansionState;
pub use service::CategoryService;
pub use tree::TreeService;
