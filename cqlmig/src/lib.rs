#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # cqlmig
//!
//! Configuration loading and validation for Cassandra schema migrations.
//!
//! This library reads a YAML configuration describing a keyspace, its
//! replication profiles and a directory of CQL migration scripts, checks
//! every setting up front and exposes the result as an immutable
//! [`MigrationConfig`].
//!
//! ## Core Types
//!
//! - [`MigrationConfig`] and [`ReplicationProfile`]: the validated configuration
//! - [`Migration`]: a migration script discovered on disk
//! - [`config::ConfigEntry`]: declarative extraction of a single key
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use cqlmig::MigrationConfig;
//! use std::path::Path;
//!
//! let yaml = "keyspace: shop\nmigrations_path: migrations\n";
//! let config = MigrationConfig::from_yaml(yaml, Path::new("/srv/shop")).unwrap();
//!
//! assert_eq!(config.keyspace(), "shop");
//! assert_eq!(config.next_version(), 1);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod migration;
pub mod template;

// Re-export key types at crate root for convenience
pub use config::{MigrationConfig, NewMigration, ReplicationProfile};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use migration::Migration;
