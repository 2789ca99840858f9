//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `validate`: Validate the configuration file
//! - `show`: Print the validated configuration or one profile
//! - `migrations`: List discovered migration files
//! - `generate`: Create the next migration file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod generate;
pub mod migrations;
pub mod show;
pub mod validate;

pub use completions::CompletionsCommand;
pub use generate::GenerateCommand;
pub use migrations::MigrationsCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;
