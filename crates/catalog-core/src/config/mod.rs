//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod catalog;
pub mod logging;

use serde::{Deserialize, Serialize};
use tracing::debug;

use self::catalog::CatalogConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "CATALOG";

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML files
/// (base file + optional environment overlay) and `CATALOG__*`
/// environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Category catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file plus environment variables.
    ///
    /// A missing file is not an error; every field has a default.
    pub fn load(path: &str) -> Result<Self, AppError> {
        Self::load_with_overlay(path, None)
    }

    /// Load configuration from a base file, an optional overlay file, and
    /// environment variables prefixed with `CATALOG__`.
    pub fn load_with_overlay(path: &str, overlay: Option<&str>) -> Result<Self, AppError> {
        let mut builder =
            config::Config::builder().add_source(config::File::with_name(path).required(false));

        if let Some(overlay) = overlay {
            builder = builder.add_source(config::File::with_name(overlay).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        debug!(path, ?overlay, "Configuration loaded");
        Ok(loaded)
    }

    /// Check values that deserialize fine but make no sense at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        let prefix = &self.catalog.id_prefix;
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(AppError::configuration(format!(
                "catalog.id_prefix must be non-empty ASCII alphanumeric, got '{prefix}'"
            )));
        }

        match self.logging.format.to_ascii_lowercase().as_str() {
            "json" | "pretty" => Ok(()),
            other => Err(AppError::configuration(format!(
                "logging.format must be 'json' or 'pretty', got '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("absent.toml");

        let config = AppConfig::load(path.to_str().expect("utf8 path")).expect("load");
        assert!(config.catalog.seed_mock_data);
        assert_eq!(config.catalog.id_prefix, "cat");
        assert!(!config.catalog.expand_all_on_open);
        assert_eq!(config.logging.level, "warn");
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn test_file_and_overlay_merge() {
        let temp = tempfile::tempdir().expect("tempdir");
        let base = temp.path().join("default.toml");
        let overlay = temp.path().join("test.toml");

        std::fs::write(
            &base,
            "[logging]\nlevel = \"info\"\nformat = \"json\"\n\n[catalog]\nid_prefix = \"node\"\n",
        )
        .expect("write base");
        std::fs::write(&overlay, "[catalog]\nseed_mock_data = false\n").expect("write overlay");

        let config = AppConfig::load_with_overlay(
            base.to_str().expect("utf8 path"),
            Some(overlay.to_str().expect("utf8 path")),
        )
        .expect("load");

        assert_eq!(config.logging.level, "info");
        assert!(config.logging.is_json());
        assert_eq!(config.catalog.id_prefix, "node");
        assert!(!config.catalog.seed_mock_data);
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        let mut config = AppConfig::default();
        config.catalog.id_prefix = "has space".to_string();
        let err = config.validate().expect_err("should reject");
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
