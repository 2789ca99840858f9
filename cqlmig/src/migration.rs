//! Migration script discovery.
//!
//! A [`Migration`] is one CQL file in the migrations directory. Files are
//! found by glob pattern, ordered by a natural sort of their file names
//! (so `v2_x.cql` comes before `v10_y.cql`), and fingerprinted with a
//! SHA-256 checksum of their content.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// A migration script loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Full path of the file.
    pub path: PathBuf,
    /// File name, including the extension.
    pub name: String,
    /// File content.
    pub content: String,
    /// Lowercase hex SHA-256 of the content.
    pub checksum: String,
}

impl Migration {
    /// Builds a migration from a path and its content.
    ///
    /// # Examples
    ///
    /// ```
    /// use cqlmig::Migration;
    ///
    /// let migration = Migration::from_parts("migrations/v1_init.cql", "");
    /// assert_eq!(migration.name, "v1_init.cql");
    /// assert_eq!(
    ///     migration.checksum,
    ///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    /// );
    /// ```
    pub fn from_parts(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        let content = content.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let checksum = hex::encode(Sha256::digest(content.as_bytes()));
        Self {
            path,
            name,
            content,
            checksum,
        }
    }

    /// Loads a migration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Migration`] if the file cannot be read or is not
    /// valid UTF-8.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Migration {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_parts(path, content))
    }

    /// Sorts paths naturally by file name.
    ///
    /// # Examples
    ///
    /// ```
    /// use cqlmig::Migration;
    /// use std::path::PathBuf;
    ///
    /// let mut paths = vec![PathBuf::from("v10_b.cql"), PathBuf::from("v2_a.cql")];
    /// Migration::sort_paths(&mut paths);
    /// assert_eq!(paths, [PathBuf::from("v2_a.cql"), PathBuf::from("v10_b.cql")]);
    /// ```
    pub fn sort_paths(paths: &mut [PathBuf]) {
        paths.sort_by_cached_key(|path| {
            natural_sort_key(&path.file_name().unwrap_or_default().to_string_lossy())
        });
    }

    /// Loads every regular file directly inside `base` whose name matches
    /// one of `patterns`, in natural order.
    ///
    /// A missing `base` directory yields no migrations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for a bad pattern,
    /// [`Error::InvalidPath`] if `base` exists but cannot be listed, and
    /// [`Error::Migration`] if a matching file cannot be loaded.
    pub fn glob_all(base: &Path, patterns: &[&str]) -> Result<Vec<Self>> {
        let matcher = build_globset(patterns)?;

        if !base.is_dir() {
            log::debug!(
                "Migrations directory {} does not exist, no migrations loaded",
                base.display()
            );
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(base).map_err(|e| Error::InvalidPath {
            path: base.to_path_buf(),
            reason: format!("Failed to list migrations directory: {e}"),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let matches = path
                .file_name()
                .is_some_and(|name| matcher.is_match(Path::new(name)));
            if matches && path.is_file() {
                paths.push(path);
            }
        }

        Self::sort_paths(&mut paths);
        log::debug!("Found {} migration file(s) in {}", paths.len(), base.display());
        paths.iter().map(|path| Self::load(path)).collect()
    }
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// One run of a natural sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyPart {
    Number(String),
    Text(String),
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Leading zeros are stripped, so a longer run is a larger number.
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn natural_sort_key(name: &str) -> Vec<KeyPart> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;

    let mut flush = |current: &mut String, digits: bool| {
        if current.is_empty() {
            return;
        }
        let run = std::mem::take(current);
        parts.push(if digits {
            let trimmed = run.trim_start_matches('0');
            KeyPart::Number(trimmed.to_string())
        } else {
            KeyPart::Text(run)
        });
    };

    for ch in name.chars() {
        let is_digit = ch.is_ascii_digit();
        if is_digit != in_digits {
            flush(&mut current, in_digits);
            in_digits = is_digit;
        }
        current.push(ch);
    }
    flush(&mut current, in_digits);

    parts
}
