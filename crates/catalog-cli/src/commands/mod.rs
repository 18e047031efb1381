//! CLI command definitions and dispatch.

pub mod browse;
pub mod category;
pub mod config;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use catalog_core::config::AppConfig;
use catalog_core::error::AppError;
use catalog_store::{CategoryRepository, MemoryCategoryRepository};

use crate::output::OutputFormat;

/// Catalog admin: browse and edit the product category hierarchy
#[derive(Debug, Parser)]
#[command(name = "catalog", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Optional overlay file merged on top of the base configuration
    #[arg(long)]
    pub overlay: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Category management
    Category(category::CategoryArgs),
    /// Interactive tree session
    Browse(browse::BrowseArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Load the base file, the overlay, and `CATALOG__*` overrides.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_with_overlay(&self.config, self.overlay.as_deref())
    }

    /// Execute the CLI command
    pub fn execute(&self, app_config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Category(args) => category::execute(args, app_config, self.format),
            Commands::Browse(args) => browse::execute(args, app_config),
            Commands::Config(args) => {
                config::execute(args, app_config, &self.config, self.format)
            }
        }
    }
}

/// Helper: open the in-memory store described by `config`
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn CategoryRepository>, AppError> {
    config.validate()?;

    let repo = if config.catalog.seed_mock_data {
        MemoryCategoryRepository::seeded()?
    } else {
        MemoryCategoryRepository::new()
    };
    debug!(seeded = config.catalog.seed_mock_data, "Category store opened");

    Ok(Arc::new(repo))
}
