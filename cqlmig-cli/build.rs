//! Build script for cqlmig-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("cqlmig")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate and inspect Cassandra migration configurations")
        .long_about(
            "Command-line tool for checking cqlmig configuration files, listing \
             discovered CQL migrations and scaffolding new ones",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to the migration configuration file")
                .value_name("PATH")
                .global(true)
                .env("CQLMIG_CONFIG")
                .default_value("cqlmig.yml"),
        )
        .subcommands(vec![
            Command::new("validate")
                .about("Validate the configuration file")
                .long_about("Load the configuration, check every key and report the first error"),
            Command::new("show")
                .about("Print the validated configuration")
                .long_about("Print the configuration with defaults applied, or a single profile"),
            Command::new("migrations")
                .about("List discovered migration files")
                .long_about("List migration files in version order with their checksums"),
            Command::new("generate")
                .about("Create a new migration file")
                .long_about("Render the configured templates into the next migration file"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("cqlmig.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
