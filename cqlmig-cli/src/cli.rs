//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, GenerateCommand, MigrationsCommand, ShowCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for Cassandra migration configurations.
#[derive(Parser)]
#[command(name = "cqlmig")]
#[command(
    version,
    about = "Validate and inspect Cassandra migration configurations",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Path to the migration configuration file
    #[arg(
        short,
        long,
        value_name = "PATH",
        global = true,
        env = "CQLMIG_CONFIG",
        default_value = "cqlmig.yml"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate the configuration file
    Validate(ValidateCommand),

    /// Print the validated configuration
    Show(ShowCommand),

    /// List discovered migration files
    Migrations(MigrationsCommand),

    /// Create a new migration file
    Generate(GenerateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
