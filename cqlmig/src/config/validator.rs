//! Value validators for configuration keys.
//!
//! The `validate_*` functions check plain strings. The short-named
//! functions ([`identifier`], [`template`]) adapt them to the
//! [`Validator`](super::Validator) signature used by
//! [`ConfigEntry`](super::ConfigEntry).

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::config::entry::ValueType;
use crate::error::{Error, Result};
use crate::template::validate_template_fields;

static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("Invalid identifier regex")
});

/// Checks that `value` is a letter followed by letters, digits or
/// underscores.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] if the value is not an identifier.
///
/// # Examples
///
/// ```
/// use cqlmig::config::validator::validate_identifier;
///
/// assert!(validate_identifier("my_keyspace2").is_ok());
/// assert!(validate_identifier("2fast").is_err());
/// assert!(validate_identifier("has space").is_err());
/// ```
pub fn validate_identifier(value: &str) -> Result<()> {
    if IDENTIFIER_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(Error::InvalidValue(
            "Identifiers must consist of a letter followed by letters, numbers or underscores"
                .to_string(),
        ))
    }
}

/// [`validate_identifier`] for a YAML value.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] if the value is not a string or not an
/// identifier.
pub fn identifier(value: &Value) -> Result<()> {
    validate_identifier(as_str(value)?)
}

/// [`validate_template_fields`] for a YAML value.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] if the value is not a string or
/// references a field outside the migration field set.
pub fn template(value: &Value) -> Result<()> {
    validate_template_fields(as_str(value)?)
}

fn as_str(value: &Value) -> Result<&str> {
    value.as_str().ok_or_else(|| {
        Error::InvalidValue(format!(
            "expected a string, found {}",
            ValueType::describe(value)
        ))
    })
}
