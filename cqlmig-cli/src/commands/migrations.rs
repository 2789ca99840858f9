//! Migrations command implementation.
//!
//! Lists the migration files found in the configured directory, in the
//! order they would be applied.

use crate::error::CliError;
use crate::utils::{load_config, print_json, short_checksum, GlobalOptions};
use clap::{Args, ValueEnum};
use cqlmig::Migration;
use std::io::Write;

/// Column headers for table output.
const COLUMN_HEADERS: [&str; 3] = ["version", "name", "checksum"];

/// List discovered migration files.
#[derive(Args)]
pub struct MigrationsCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

/// Output format for the migrations command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
}

impl MigrationsCommand {
    /// Execute the migrations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_config(global)?;

        match self.format {
            OutputFormat::Table => format_as_table(config.migrations()),
            OutputFormat::Json => format_as_json(config.migrations()),
        }
    }
}

/// Format migrations as a human-readable table.
fn format_as_table(migrations: &[Migration]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for (index, migration) in migrations.iter().enumerate() {
        writeln!(
            handle,
            "{}\t{}\t{}",
            index + 1,
            migration.name,
            short_checksum(&migration.checksum),
        )?;
    }

    Ok(())
}

/// Format migrations as JSON.
fn format_as_json(migrations: &[Migration]) -> Result<(), CliError> {
    let json_data: Vec<serde_json::Value> = migrations
        .iter()
        .enumerate()
        .map(|(index, m)| {
            serde_json::json!({
                "version": index + 1,
                "name": m.name,
                "path": m.path.display().to_string(),
                "checksum": m.checksum,
            })
        })
        .collect();

    print_json(&json_data)
}
