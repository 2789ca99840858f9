//! Error types for the cqlmig library.
//!
//! Every fallible operation in the crate returns [`Result`], built on the
//! single [`Error`] enum defined here with `thiserror`.

use std::path::PathBuf;

use serde_yaml::Value;
use thiserror::Error;

/// Result type alias for operations that may fail with a cqlmig error.
///
/// # Examples
///
/// ```
/// use cqlmig::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("keyspace".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the cqlmig library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration key was missing, had the wrong type, or was rejected
    /// by its validator.
    #[error("invalid configuration for '{key}': {message}")]
    ConfigValidation {
        /// Full dotted path of the offending key (e.g. `profiles.dev.replication`).
        key: String,
        /// The rejected value, or `None` if the key was absent.
        value: Option<Value>,
        /// A description of the failure.
        message: String,
    },

    /// A value failed a validator or a template could not be rendered.
    ///
    /// Validators raise this without knowing which key they were applied to;
    /// configuration extraction re-raises it as [`Error::ConfigValidation`].
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// The configuration document is not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration file {}: {source}", path.display())]
    ConfigRead {
        /// The configuration file.
        path: PathBuf,
        /// The underlying read failure.
        #[source]
        source: std::io::Error,
    },

    /// A migrations directory or generated migration path could not be used.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// Why the path could not be used.
        reason: String,
    },

    /// A migration file could not be loaded.
    #[error("cannot load migration {}: {reason}", path.display())]
    Migration {
        /// The migration file.
        path: PathBuf,
        /// Why loading failed.
        reason: String,
    },

    /// A migration discovery pattern is not a valid glob.
    #[error("invalid migration pattern: {0}")]
    InvalidPattern(#[from] globset::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the key path for configuration validation errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use cqlmig::Error;
    ///
    /// let err = Error::ConfigValidation {
    ///     key: "keyspace".to_string(),
    ///     value: None,
    ///     message: "Key is mandatory".to_string(),
    /// };
    /// assert_eq!(err.config_key(), Some("keyspace"));
    /// assert_eq!(Error::InvalidValue("x".into()).config_key(), None);
    /// ```
    #[must_use]
    pub fn config_key(&self) -> Option<&str> {
        match self {
            Self::ConfigValidation { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Check if error is a configuration validation failure.
    #[must_use]
    pub fn is_config_validation(&self) -> bool {
        matches!(self, Self::ConfigValidation { .. })
    }
}
