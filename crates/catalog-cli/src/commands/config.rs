//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use catalog_core::config::AppConfig;
use catalog_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the effective configuration
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_item(config, format)?,
        ConfigCommand::Validate => match config.validate() {
            Ok(()) => {
                output::print_success(&format!("Configuration '{config_path}' is valid"));
                output::print_kv("Log level", &config.logging.level);
                output::print_kv("Log format", &config.logging.format);
                output::print_kv("Seed data", &config.catalog.seed_mock_data.to_string());
                output::print_kv("ID prefix", &config.catalog.id_prefix);
                output::print_kv(
                    "Expand on open",
                    &config.catalog.expand_all_on_open.to_string(),
                );
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}
