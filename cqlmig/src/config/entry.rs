//! Generic extraction of a single configuration key.
//!
//! Each recognized key is described by a [`ConfigEntry`] rule: whether it
//! has a default, what YAML type it must have, and an optional validator.
//! Extraction applies the rule to a raw mapping and fails on the first
//! violation with [`Error::ConfigValidation`].

use std::fmt;

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Validator applied to a value after its type has been checked.
///
/// Validators report problems as [`Error::InvalidValue`]; extraction turns
/// that into a [`Error::ConfigValidation`] carrying the key path.
pub type Validator = fn(&Value) -> Result<()>;

/// YAML value types a configuration key can be required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// A string scalar.
    String,
    /// A boolean scalar.
    Bool,
    /// An integer or float.
    Number,
    /// A list.
    Sequence,
    /// A key/value mapping.
    Mapping,
}

impl ValueType {
    /// Whether `value` is of this type.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Bool, Value::Bool(_))
                | (Self::Number, Value::Number(_))
                | (Self::Sequence, Value::Sequence(_))
                | (Self::Mapping, Value::Mapping(_))
        )
    }

    /// Human-readable name of the type of any YAML value.
    ///
    /// # Examples
    ///
    /// ```
    /// use cqlmig::config::ValueType;
    /// use serde_yaml::Value;
    ///
    /// assert_eq!(ValueType::describe(&Value::Bool(true)), "bool");
    /// assert_eq!(ValueType::describe(&Value::Null), "null");
    /// ```
    #[must_use]
    pub fn describe(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Tagged(_) => "tagged value",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "bool"),
            Self::Number => write!(f, "number"),
            Self::Sequence => write!(f, "sequence"),
            Self::Mapping => write!(f, "mapping"),
        }
    }
}

/// Extraction rule for one configuration key.
///
/// # Examples
///
/// ```
/// use cqlmig::config::{validator, ConfigEntry, ValueType};
/// use serde_yaml::{Mapping, Value};
///
/// let data: Mapping = serde_yaml::from_str("keyspace: app").unwrap();
///
/// let keyspace = ConfigEntry::new("keyspace")
///     .validate(validator::identifier)
///     .extract_string(&data)
///     .unwrap();
/// assert_eq!(keyspace, "app");
///
/// let table = ConfigEntry::new("migrations_table")
///     .default(Value::String("database_migrations".into()))
///     .of_type(ValueType::String)
///     .extract(&data)
///     .unwrap();
/// assert_eq!(table.as_str(), Some("database_migrations"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigEntry<'k> {
    key: &'k str,
    prefix: String,
    default: Option<Value>,
    expected: Option<ValueType>,
    validator: Option<Validator>,
}

impl<'k> ConfigEntry<'k> {
    /// Creates a rule for a mandatory key with no type or validator.
    #[must_use]
    pub fn new(key: &'k str) -> Self {
        Self {
            key,
            prefix: String::new(),
            default: None,
            expected: None,
            validator: None,
        }
    }

    /// Sets the key-path prefix used in error messages (e.g. `profiles.dev.`).
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Makes the key optional, falling back to `default`.
    ///
    /// `Value::Null` is a legitimate default and differs from having none.
    #[must_use]
    pub fn default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Requires the resolved value to be of the given type.
    #[must_use]
    pub fn of_type(mut self, expected: ValueType) -> Self {
        self.expected = Some(expected);
        self
    }

    /// Runs `validator` on the resolved value.
    #[must_use]
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Full dotted key path reported in errors.
    #[must_use]
    pub fn key_path(&self) -> String {
        format!("{}{}", self.prefix, self.key)
    }

    /// Applies the rule to `data` and returns the resolved value.
    ///
    /// A key that is absent or explicitly null resolves to the default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] if the key is mandatory and
    /// missing, has the wrong type, or is rejected by the validator. Errors
    /// other than [`Error::InvalidValue`] raised by the validator are
    /// returned unchanged.
    pub fn extract(&self, data: &Mapping) -> Result<Value> {
        let value = match data.get(self.key) {
            Some(value) if !value.is_null() => value.clone(),
            _ => self.default.clone().ok_or_else(|| Error::ConfigValidation {
                key: self.key_path(),
                value: None,
                message: "Key is mandatory".to_string(),
            })?,
        };

        if let Some(expected) = self.expected {
            if !expected.matches(&value) {
                return Err(self.type_mismatch(value, expected));
            }
        }

        if let Some(validator) = self.validator {
            match validator(&value) {
                Ok(()) => {}
                Err(Error::InvalidValue(message)) => {
                    return Err(Error::ConfigValidation {
                        key: self.key_path(),
                        value: Some(value),
                        message: format!("Validation failed: {message}"),
                    })
                }
                Err(other) => return Err(other),
            }
        }

        Ok(value)
    }

    /// Extracts a string value; the type check is implied.
    ///
    /// # Errors
    ///
    /// See [`extract`](Self::extract).
    pub fn extract_string(self, data: &Mapping) -> Result<String> {
        match self.clone().of_type(ValueType::String).extract(data)? {
            Value::String(value) => Ok(value),
            other => Err(self.type_mismatch(other, ValueType::String)),
        }
    }

    /// Extracts a boolean value; the type check is implied.
    ///
    /// # Errors
    ///
    /// See [`extract`](Self::extract).
    pub fn extract_bool(self, data: &Mapping) -> Result<bool> {
        match self.clone().of_type(ValueType::Bool).extract(data)? {
            Value::Bool(value) => Ok(value),
            other => Err(self.type_mismatch(other, ValueType::Bool)),
        }
    }

    /// Extracts a mapping value; the type check is implied.
    ///
    /// # Errors
    ///
    /// See [`extract`](Self::extract).
    pub fn extract_mapping(self, data: &Mapping) -> Result<Mapping> {
        match self.clone().of_type(ValueType::Mapping).extract(data)? {
            Value::Mapping(value) => Ok(value),
            other => Err(self.type_mismatch(other, ValueType::Mapping)),
        }
    }

    fn type_mismatch(&self, value: Value, expected: ValueType) -> Error {
        Error::ConfigValidation {
            key: self.key_path(),
            message: format!(
                "Value has wrong type {}, expected {expected}",
                ValueType::describe(&value)
            ),
            value: Some(value),
        }
    }
}
