//! Show command implementation.
//!
//! Prints the configuration with every default applied, as YAML or JSON.

use crate::error::CliError;
use crate::utils::{load_config, print_json, print_yaml, GlobalOptions};
use clap::{Args, ValueEnum};
use cqlmig::{MigrationConfig, ReplicationProfile};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Print the validated configuration.
#[derive(Args)]
pub struct ShowCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "yaml", ignore_case = true)]
    pub format: ShowFormat,

    /// Print only the named replication profile
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,
}

/// Output format for the show command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ShowFormat {
    /// YAML, the same shape as the input file
    Yaml,
    /// JSON format
    Json,
}

/// Serializable view of a loaded configuration.
#[derive(Serialize)]
struct ConfigView<'a> {
    keyspace: &'a str,
    profiles: &'a BTreeMap<String, ReplicationProfile>,
    migrations_path: &'a Path,
    migrations_table: &'a str,
    new_migration_name: &'a str,
    new_migration_text: &'a str,
    migrations: Vec<&'a str>,
}

impl<'a> From<&'a MigrationConfig> for ConfigView<'a> {
    fn from(config: &'a MigrationConfig) -> Self {
        Self {
            keyspace: config.keyspace(),
            profiles: config.profiles(),
            migrations_path: config.migrations_path(),
            migrations_table: config.migrations_table(),
            new_migration_name: config.new_migration_name(),
            new_migration_text: config.new_migration_text(),
            migrations: config.migrations().iter().map(|m| m.name.as_str()).collect(),
        }
    }
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_config(global)?;

        if let Some(name) = &self.profile {
            let profile = config.profile(name).ok_or_else(|| {
                CliError::InvalidArguments(format!("Unknown profile: {name}"))
            })?;
            return self.print(profile);
        }

        self.print(&ConfigView::from(&config))
    }

    fn print<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CliError> {
        match self.format {
            ShowFormat::Yaml => print_yaml(value),
            ShowFormat::Json => print_json(value),
        }
    }
}
