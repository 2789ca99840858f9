//! Command to validate a migration configuration file.

use crate::error::CliError;
use crate::utils::{load_config, GlobalOptions};
use clap::Args;

/// Validate the configuration file.
#[derive(Args)]
pub struct ValidateCommand {}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = match load_config(global) {
            Ok(config) => config,
            Err(e @ CliError::Library(cqlmig::Error::ConfigValidation { .. })) => {
                eprintln!("Validation error: {e}");
                return Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ));
            }
            Err(e) => return Err(e),
        };

        println!("Configuration is valid");
        if !global.quiet {
            println!(
                "keyspace {}: {} profile(s), {} migration(s) in {}",
                config.keyspace(),
                config.profiles().len(),
                config.migrations().len(),
                config.migrations_path().display()
            );
        }

        Ok(())
    }
}
