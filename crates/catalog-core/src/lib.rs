//! # catalog-core
//!
//! Core crate for the catalog admin. Contains the unified error system,
//! configuration schemas, typed identifiers, list filter types, and the
//! generic repository trait.
//!
//! This crate has **no** internal dependencies on other catalog crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
