//! Migration configuration loading and validation.
//!
//! A configuration document is a YAML mapping:
//!
//! ```yaml
//! keyspace: shop                      # required identifier
//! migrations_path: migrations         # required, relative to this file
//! migrations_table: schema_versions   # optional identifier
//! new_migration_name: "v{next_version}_{desc}"
//! new_migration_text: "-- {full_desc}"
//! profiles:                           # optional, merged over `dev`
//!   prod:
//!     replication: {class: NetworkTopologyStrategy, dc1: 3}
//!     durable_writes: true
//! ```
//!
//! Loading validates every key eagerly and stops at the first problem,
//! reporting it as [`Error::ConfigValidation`](crate::Error::ConfigValidation)
//! with the dotted key path (e.g. `profiles.prod.replication`).
//!
//! # Examples
//!
//! ```
//! use cqlmig::config::MigrationConfig;
//! use std::path::Path;
//!
//! let config = MigrationConfig::from_yaml(
//!     "keyspace: shop\nmigrations_path: migrations",
//!     Path::new("/app/conf"),
//! )
//! .unwrap();
//!
//! assert_eq!(config.keyspace(), "shop");
//! assert_eq!(config.migrations_path(), Path::new("/app/conf/migrations"));
//! assert_eq!(config.migrations_table(), "database_migrations");
//! assert!(config.profile("dev").is_some());
//! ```

pub mod entry;
pub mod generate;
pub mod loader;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

// Re-export key types at module root
pub use entry::{ConfigEntry, Validator, ValueType};
pub use generate::{clean_description, NewMigration};
pub use loader::extract_profile;
pub use schema::{
    MigrationConfig, ReplicationProfile, DEFAULT_MIGRATIONS_TABLE, DEFAULT_NEW_MIGRATION_NAME,
    DEFAULT_NEW_MIGRATION_TEXT, DEFAULT_PROFILES, MIGRATION_FILE_PATTERN,
};
pub use validator::validate_identifier;
