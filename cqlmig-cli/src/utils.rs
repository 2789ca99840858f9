//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading and output helpers.

use crate::error::CliError;
use cqlmig::MigrationConfig;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Path to the configuration file.
    pub config: PathBuf,
}

/// Load and validate the configuration named by the global options.
///
/// An unreadable or unparsable file maps to a configuration error (exit
/// code 7); every other failure keeps its library error.
pub fn load_config(global: &GlobalOptions) -> Result<MigrationConfig, CliError> {
    log::debug!("Loading configuration from {}", global.config.display());
    Ok(MigrationConfig::load(&global.config)?)
}

/// Write a value to stdout as pretty-printed JSON followed by a newline.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    serde_json::to_writer_pretty(&mut handle, value).map_err(|e| CliError::Io(e.into()))?;
    writeln!(handle)?;

    Ok(())
}

/// Write a value to stdout as YAML.
pub fn print_yaml<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let text = serde_yaml::to_string(value).map_err(|e| CliError::Library(e.into()))?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{text}")?;

    Ok(())
}

/// Shorten a checksum for table display.
pub fn short_checksum(checksum: &str) -> &str {
    checksum.get(..12).unwrap_or(checksum)
}
