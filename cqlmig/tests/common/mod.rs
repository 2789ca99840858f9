//! Common test utilities for integration tests.
//!
//! Provides a temporary project layout with a config file and a
//! migrations directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway project directory holding a config file and migrations.
pub struct TestProject {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Creates an empty project directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Root of the project.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `cqlmig.yml` and returns its path.
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write_file("cqlmig.yml", content)
    }

    /// Writes a file relative to the project root, creating parents.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes a migration script into `migrations/`.
    pub fn add_migration(&self, name: &str, content: &str) -> PathBuf {
        self.write_file(&format!("migrations/{name}"), content)
    }
}

/// A minimal valid config pointing at `migrations/`.
#[allow(dead_code)]
pub const MINIMAL_CONFIG: &str = "keyspace: shop\nmigrations_path: migrations\n";
