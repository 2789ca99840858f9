//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Test data fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A minimal valid configuration pointing at `migrations/`.
#[allow(dead_code)]
pub const MINIMAL_CONFIG: &str = "keyspace: shop\nmigrations_path: migrations\n";

/// Test environment with an isolated project directory.
///
/// This struct provides:
/// - A temporary directory holding `cqlmig.yml`
/// - A `migrations/` directory path (created on first migration)
/// - Helper methods for common CLI operations
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the configuration file
    pub config_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The configuration file is not written yet.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let config_path = temp_path.join("cqlmig.yml");

        Self {
            temp_dir,
            temp_path,
            config_path,
        }
    }

    /// Create a test environment with the given configuration written.
    pub fn with_config(content: &str) -> Self {
        let env = Self::new();
        env.write_config(content);
        env
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Environment variables that would leak settings from the caller are
    /// cleared.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("cqlmig").expect("Failed to find cqlmig binary");
        cmd.env_remove("CQLMIG_CONFIG").env_remove("CQLMIG_LOG_MODE");
        cmd
    }

    /// Get a command builder with `--config` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config").arg(&self.config_path);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the migrations directory used by [`MINIMAL_CONFIG`].
    pub fn migrations_dir(&self) -> PathBuf {
        self.temp_path.join("migrations")
    }

    /// Write the configuration file.
    pub fn write_config(&self, content: &str) {
        std::fs::write(&self.config_path, content).expect("Failed to write config");
    }

    /// Write a migration file into `migrations/`.
    pub fn add_migration(&self, name: &str, content: &str) -> PathBuf {
        let dir = self.migrations_dir();
        std::fs::create_dir_all(&dir).expect("Failed to create migrations directory");
        let path = dir.join(name);
        std::fs::write(&path, content).expect("Failed to write migration");
        path
    }

    /// Run a command and return its stdout, asserting success.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run cqlmig");

        assert!(
            output.status.success(),
            "cqlmig {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
