//! Category catalog configuration.

use serde::{Deserialize, Serialize};

/// Settings for the in-memory category catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Populate the store with the built-in mock categories on startup.
    #[serde(default = "default_true")]
    pub seed_mock_data: bool,
    /// Prefix for generated category identifiers (`<prefix>-<uuid>`).
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
    /// Start every browse session with all nodes expanded.
    #[serde(default)]
    pub expand_all_on_open: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_mock_data: true,
            id_prefix: default_id_prefix(),
            expand_all_on_open: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_id_prefix() -> String {
    "cat".to_string()
}
