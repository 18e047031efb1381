//! # catalog-store
//!
//! Storage layer for categories. [`CategoryRepository`] extends the
//! generic [`catalog_core::traits::Repository`] with the hierarchy
//! queries the services need; [`MemoryCategoryRepository`] keeps the
//! flat collection in memory and stands in for a real backend.

pub mod memory;
pub mod repository;
pub mod seed;

pub use memory::MemoryCategoryRepository;
pub use repository::CategoryRepository;
