//! Configuration schema definitions.
//!
//! [`MigrationConfig`] is the validated, immutable result of loading a
//! migration config document. It is only ever built by the loader, which
//! guarantees the invariants documented on each accessor.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::migration::Migration;

/// Table that records applied migrations when the config does not name one.
pub const DEFAULT_MIGRATIONS_TABLE: &str = "database_migrations";

/// File name template for new migrations when the config does not set one.
pub const DEFAULT_NEW_MIGRATION_NAME: &str = "v{next_version}_{desc}";

/// Initial file content for new migrations when the config does not set one.
pub const DEFAULT_NEW_MIGRATION_TEXT: &str = "/* Cassandra migration for keyspace {keyspace}.
   Version {next_version} - {date}

   {full_desc} */
";

/// Glob matching migration files inside the migrations directory.
pub const MIGRATION_FILE_PATTERN: &str = "*.cql";

/// Built-in replication profiles, present unless the config overrides them.
///
/// Contains a single `dev` profile using `SimpleStrategy` with a
/// replication factor of 1.
///
/// # Examples
///
/// ```
/// use cqlmig::config::DEFAULT_PROFILES;
/// use serde_yaml::Value;
///
/// let dev = &DEFAULT_PROFILES["dev"];
/// assert!(dev.durable_writes);
/// assert_eq!(
///     dev.replication.get("class"),
///     Some(&Value::String("SimpleStrategy".into()))
/// );
/// ```
pub static DEFAULT_PROFILES: LazyLock<BTreeMap<String, ReplicationProfile>> = LazyLock::new(|| {
    let mut replication = Mapping::new();
    replication.insert(
        Value::String("class".into()),
        Value::String("SimpleStrategy".into()),
    );
    replication.insert(
        Value::String("replication_factor".into()),
        Value::Number(1.into()),
    );

    BTreeMap::from([(
        "dev".to_string(),
        ReplicationProfile {
            replication,
            durable_writes: true,
        },
    )])
});

/// Keyspace replication settings for one deployment environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicationProfile {
    /// Replication strategy options, passed through untouched
    /// (e.g. `class`, `replication_factor`, per-datacenter factors).
    pub replication: Mapping,
    /// Whether the keyspace uses the commit log for writes.
    pub durable_writes: bool,
}

/// Validated migration configuration.
///
/// Built once by [`MigrationConfig::load`] or one of its siblings and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub(crate) keyspace: String,
    pub(crate) profiles: BTreeMap<String, ReplicationProfile>,
    pub(crate) migrations_path: PathBuf,
    pub(crate) migrations_table: String,
    pub(crate) new_migration_name: String,
    pub(crate) new_migration_text: String,
    pub(crate) migrations: Vec<Migration>,
}

impl MigrationConfig {
    /// Keyspace under management; always a valid identifier.
    #[must_use]
    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    /// Replication profiles by name, including the built-in `dev` profile
    /// unless the config replaced it.
    #[must_use]
    pub fn profiles(&self) -> &BTreeMap<String, ReplicationProfile> {
        &self.profiles
    }

    /// Looks up a single profile.
    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&ReplicationProfile> {
        self.profiles.get(name)
    }

    /// Directory holding migration files, resolved against the config's
    /// directory.
    #[must_use]
    pub fn migrations_path(&self) -> &Path {
        &self.migrations_path
    }

    /// Table recording applied migrations; always a valid identifier.
    #[must_use]
    pub fn migrations_table(&self) -> &str {
        &self.migrations_table
    }

    /// Template for new migration file names (without extension).
    #[must_use]
    pub fn new_migration_name(&self) -> &str {
        &self.new_migration_name
    }

    /// Template for the initial content of new migration files.
    #[must_use]
    pub fn new_migration_text(&self) -> &str {
        &self.new_migration_text
    }

    /// Migrations discovered in [`migrations_path`](Self::migrations_path),
    /// in version order.
    #[must_use]
    pub fn migrations(&self) -> &[Migration] {
        &self.migrations
    }

    /// Version number a newly generated migration would receive.
    #[must_use]
    pub fn next_version(&self) -> usize {
        self.migrations.len() + 1
    }

    /// 1-based version of the migration with the given file name.
    #[must_use]
    pub fn migration_version(&self, name: &str) -> Option<usize> {
        self.migrations
            .iter()
            .position(|migration| migration.name == name)
            .map(|index| index + 1)
    }
}
