//! # catalog-entity
//!
//! Domain entity models for the catalog admin. Every struct in this crate
//! is either a stored record or a derived view over stored records. All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod category;
