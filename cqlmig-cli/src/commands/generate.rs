//! Generate command implementation.
//!
//! Renders `new_migration_name` and `new_migration_text` for the next
//! version and writes the result into the migrations directory.

use crate::error::CliError;
use crate::utils::{load_config, GlobalOptions};
use chrono::Utc;
use clap::Args;

/// Create a new migration file.
#[derive(Args)]
pub struct GenerateCommand {
    /// Description of the change; words are joined with spaces
    #[arg(value_name = "DESCRIPTION", required = true, num_args = 1..)]
    pub description: Vec<String>,

    /// Print the rendered file name and content instead of writing
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Execute the generate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let description = self.description.join(" ");
        if description.trim().is_empty() {
            return Err(CliError::InvalidArguments(
                "Migration description must not be empty".to_string(),
            ));
        }

        let config = load_config(global)?;

        if self.dry_run {
            let migration = config.new_migration(&description, Utc::now())?;
            println!("{}", config.migrations_path().join(&migration.file_name).display());
            if !global.quiet {
                print!("{}", migration.text);
            }
            return Ok(());
        }

        let path = config.generate_migration(&description)?;
        println!("{}", path.display());

        Ok(())
    }
}
