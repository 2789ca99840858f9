//! Main entry point for the cqlmig CLI.
//!
//! Commands:
//! - `validate`: Check a migration configuration file
//! - `show`: Print the validated configuration
//! - `migrations`: List discovered migration files
//! - `generate`: Create the next migration file
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = cqlmig::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Migrations(cmd) => cmd.execute(&global),
        cli::Command::Generate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
