//! Configuration file loading.
//!
//! Reads a YAML document, extracts every recognized key through
//! [`ConfigEntry`] rules, merges replication profiles over the built-in
//! defaults and finally discovers migration files.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::config::entry::{ConfigEntry, ValueType};
use crate::config::schema::{
    MigrationConfig, ReplicationProfile, DEFAULT_MIGRATIONS_TABLE, DEFAULT_NEW_MIGRATION_NAME,
    DEFAULT_NEW_MIGRATION_TEXT, DEFAULT_PROFILES, MIGRATION_FILE_PATTERN,
};
use crate::config::validator;
use crate::error::{Error, Result};
use crate::migration::Migration;

impl MigrationConfig {
    /// Loads a config file, resolving relative paths against its directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigRead`] if the file cannot be read,
    /// [`Error::Yaml`] if it is not valid YAML, and
    /// [`Error::ConfigValidation`] for the first invalid key.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cqlmig::MigrationConfig;
    ///
    /// let config = MigrationConfig::load("/app/conf/cqlmig.yml").unwrap();
    /// println!("{} migrations for {}", config.migrations().len(), config.keyspace());
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Read configuration file {}", path.display());

        let base_path = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self::from_yaml(&contents, base_path)
    }

    /// Parses and validates a YAML document.
    ///
    /// Merge keys (`<<`) are applied before validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] for malformed YAML or an invalid merge,
    /// otherwise the errors of [`from_value`](Self::from_value).
    pub fn from_yaml(yaml: &str, base_path: &Path) -> Result<Self> {
        let mut data: Value = serde_yaml::from_str(yaml)?;
        // Resolve `<<: *anchor` merge keys before extraction
        data.apply_merge()?;
        Self::from_value(data, base_path)
    }

    /// Validates an already parsed document.
    ///
    /// An empty (null) document is treated as an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] if the document is not a mapping
    /// or any key is invalid.
    pub fn from_value(data: Value, base_path: &Path) -> Result<Self> {
        match data {
            Value::Mapping(mapping) => Self::from_mapping(&mapping, base_path),
            Value::Null => Self::from_mapping(&Mapping::new(), base_path),
            other => Err(Error::ConfigValidation {
                key: String::new(),
                message: format!(
                    "Configuration document must be a mapping, found {}",
                    ValueType::describe(&other)
                ),
                value: Some(other),
            }),
        }
    }

    /// Validates a raw configuration mapping.
    ///
    /// Keys are checked in a fixed order and the first violation is
    /// returned. Migration files are discovered last, once every other key
    /// is known to be valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] for the first invalid key, or a
    /// discovery error from [`Migration::glob_all`].
    pub fn from_mapping(data: &Mapping, base_path: &Path) -> Result<Self> {
        let keyspace = ConfigEntry::new("keyspace")
            .validate(validator::identifier)
            .extract_string(data)?;

        let user_profiles = ConfigEntry::new("profiles")
            .default(Value::Mapping(Mapping::new()))
            .extract_mapping(data)?;
        let mut profiles = DEFAULT_PROFILES.clone();
        for (name, _) in &user_profiles {
            let name = name.as_str().ok_or_else(|| Error::ConfigValidation {
                key: "profiles".to_string(),
                value: Some(name.clone()),
                message: "Profile names must be strings".to_string(),
            })?;
            let profile_data = ConfigEntry::new(name)
                .prefix("profiles.")
                .extract_mapping(&user_profiles)?;
            profiles.insert(name.to_string(), extract_profile(&profile_data, name)?);
        }

        let migrations_path =
            base_path.join(ConfigEntry::new("migrations_path").extract_string(data)?);

        let migrations_table = ConfigEntry::new("migrations_table")
            .default(Value::String(DEFAULT_MIGRATIONS_TABLE.into()))
            .validate(validator::identifier)
            .extract_string(data)?;

        let new_migration_name = ConfigEntry::new("new_migration_name")
            .default(Value::String(DEFAULT_NEW_MIGRATION_NAME.into()))
            .validate(validator::template)
            .extract_string(data)?;

        let new_migration_text = ConfigEntry::new("new_migration_text")
            .default(Value::String(DEFAULT_NEW_MIGRATION_TEXT.into()))
            .validate(validator::template)
            .extract_string(data)?;

        let migrations = Migration::glob_all(&migrations_path, &[MIGRATION_FILE_PATTERN])?;
        log::info!(
            "Loaded configuration for keyspace {keyspace}: {} profile(s), {} migration(s)",
            profiles.len(),
            migrations.len()
        );

        Ok(Self {
            keyspace,
            profiles,
            migrations_path,
            migrations_table,
            new_migration_name,
            new_migration_text,
            migrations,
        })
    }
}

/// Extracts one user-supplied replication profile.
///
/// Errors are reported under `profiles.<name>.<field>`.
///
/// # Errors
///
/// Returns [`Error::ConfigValidation`] if `replication` is missing or not a
/// mapping, or `durable_writes` is not a boolean.
///
/// # Examples
///
/// ```
/// use cqlmig::config::extract_profile;
/// use serde_yaml::Mapping;
///
/// let data: Mapping = serde_yaml::from_str(
///     "replication: {class: NetworkTopologyStrategy, dc1: 3}",
/// )
/// .unwrap();
/// let profile = extract_profile(&data, "prod").unwrap();
/// assert!(profile.durable_writes);
/// assert_eq!(profile.replication.len(), 2);
///
/// let err = extract_profile(&Mapping::new(), "prod").unwrap_err();
/// assert_eq!(err.config_key(), Some("profiles.prod.replication"));
/// ```
pub fn extract_profile(data: &Mapping, name: &str) -> Result<ReplicationProfile> {
    let prefix = format!("profiles.{name}.");
    Ok(ReplicationProfile {
        replication: ConfigEntry::new("replication")
            .prefix(prefix.as_str())
            .extract_mapping(data)?,
        durable_writes: ConfigEntry::new("durable_writes")
            .prefix(prefix)
            .default(Value::Bool(true))
            .extract_bool(data)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn load(yaml: &str) -> Result<MigrationConfig> {
        MigrationConfig::from_yaml(yaml, Path::new("/app/conf"))
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = load("keyspace: app\nmigrations_path: migrations").unwrap();

        assert_eq!(config.keyspace(), "app");
        assert_eq!(config.migrations_path(), Path::new("/app/conf/migrations"));
        assert_eq!(config.migrations_table(), "database_migrations");
        assert_eq!(config.new_migration_name(), "v{next_version}_{desc}");
        assert_eq!(config.new_migration_text(), DEFAULT_NEW_MIGRATION_TEXT);
        assert_eq!(config.profiles(), &*DEFAULT_PROFILES);
        assert!(config.migrations().is_empty());
    }

    #[test]
    fn test_missing_keyspace() {
        let err = load("migrations_path: migrations").unwrap_err();
        assert_eq!(err.config_key(), Some("keyspace"));
        assert!(err.to_string().contains("Key is mandatory"));
    }

    #[test]
    fn test_integer_keyspace() {
        let err = load("keyspace: 42\nmigrations_path: migrations").unwrap_err();
        assert_eq!(err.config_key(), Some("keyspace"));
        assert!(err.to_string().contains("wrong type number, expected string"));
    }

    #[test]
    fn test_invalid_keyspace_identifier() {
        let err = load("keyspace: 1app\nmigrations_path: migrations").unwrap_err();
        assert_eq!(err.config_key(), Some("keyspace"));
        assert!(err.to_string().contains("Validation failed"));
    }

    #[test]
    fn test_missing_migrations_path() {
        let err = load("keyspace: app").unwrap_err();
        assert_eq!(err.config_key(), Some("migrations_path"));
    }

    #[test]
    fn test_invalid_migrations_table() {
        let err = load("keyspace: app\nmigrations_path: m\nmigrations_table: bad-table").unwrap_err();
        assert_eq!(err.config_key(), Some("migrations_table"));
    }

    #[test]
    fn test_null_optional_key_uses_default() {
        let config = load("keyspace: app\nmigrations_path: m\nmigrations_table: ~").unwrap();
        assert_eq!(config.migrations_table(), DEFAULT_MIGRATIONS_TABLE);
    }

    #[test]
    fn test_unknown_template_field() {
        let err = load("keyspace: app\nmigrations_path: m\nnew_migration_name: '{version}'")
            .unwrap_err();
        assert_eq!(err.config_key(), Some("new_migration_name"));
        assert!(err.to_string().contains("Unknown format field: version"));

        let err = load("keyspace: app\nmigrations_path: m\nnew_migration_text: 'x {oops'")
            .unwrap_err();
        assert_eq!(err.config_key(), Some("new_migration_text"));
    }

    #[test]
    fn test_custom_templates_accepted() {
        let config = load(
            "keyspace: app\nmigrations_path: m\nnew_migration_name: '{date}_{desc}'\nnew_migration_text: '-- {full_desc}'",
        )
        .unwrap();
        assert_eq!(config.new_migration_name(), "{date}_{desc}");
        assert_eq!(config.new_migration_text(), "-- {full_desc}");
    }

    #[test]
    fn test_user_profiles_merge_with_defaults() {
        let config = load(
            r"
keyspace: app
migrations_path: m
profiles:
  prod:
    replication: {class: NetworkTopologyStrategy, dc1: 3}
    durable_writes: false
",
        )
        .unwrap();

        assert_eq!(config.profiles().len(), 2);
        assert!(config.profile("dev").is_some());
        let prod = config.profile("prod").unwrap();
        assert!(!prod.durable_writes);
        assert_eq!(
            prod.replication.get("dc1"),
            Some(&Value::Number(3.into()))
        );
    }

    #[test]
    fn test_user_dev_profile_replaces_default() {
        let config = load(
            r"
keyspace: app
migrations_path: m
profiles:
  dev:
    replication: {class: NetworkTopologyStrategy, dc1: 2}
",
        )
        .unwrap();

        let dev = config.profile("dev").unwrap();
        assert_eq!(
            dev.replication.get("class"),
            Some(&Value::String("NetworkTopologyStrategy".into()))
        );
        assert!(dev.replication.get("replication_factor").is_none());
        assert!(dev.durable_writes);
    }

    #[test]
    fn test_profile_inherits_through_merge_key() {
        let config = load(
            "keyspace: app
migrations_path: m
profiles:
  prod: &base
    replication:
      class: NetworkTopologyStrategy
      dc1: 3
  staging:
    <<: *base
    durable_writes: false
",
        )
        .unwrap();

        let prod = config.profile("prod").unwrap();
        let staging = config.profile("staging").unwrap();
        assert_eq!(staging.replication, prod.replication);
        assert_eq!(
            staging.replication.get("dc1"),
            Some(&Value::Number(3.into()))
        );
        assert!(prod.durable_writes);
        assert!(!staging.durable_writes);
    }

    #[test]
    fn test_durable_writes_requires_yaml_boolean() {
        for word in ["no", "yes", "on", "off"] {
            let yaml = format!(
                "keyspace: app\nmigrations_path: m\nprofiles:\n  prod:\n    replication: {{class: SimpleStrategy}}\n    durable_writes: {word}"
            );
            let err = load(&yaml).unwrap_err();
            assert_eq!(err.config_key(), Some("profiles.prod.durable_writes"));
            assert!(err.to_string().contains("wrong type string, expected bool"));
        }

        let config = load(
            "keyspace: app\nmigrations_path: m\nprofiles:\n  prod:\n    replication: {class: SimpleStrategy}\n    durable_writes: false",
        )
        .unwrap();
        assert!(!config.profile("prod").unwrap().durable_writes);
    }

    #[test]
    fn test_profile_errors_report_nested_key() {
        let err = load("keyspace: app\nmigrations_path: m\nprofiles:\n  prod:\n    durable_writes: true")
            .unwrap_err();
        assert_eq!(err.config_key(), Some("profiles.prod.replication"));

        let err = load(
            "keyspace: app\nmigrations_path: m\nprofiles:\n  prod:\n    replication: {class: SimpleStrategy}\n    durable_writes: sometimes",
        )
        .unwrap_err();
        assert_eq!(err.config_key(), Some("profiles.prod.durable_writes"));

        let err = load("keyspace: app\nmigrations_path: m\nprofiles:\n  prod: [1, 2]").unwrap_err();
        assert_eq!(err.config_key(), Some("profiles.prod"));

        let err = load("keyspace: app\nmigrations_path: m\nprofiles:\n  prod:").unwrap_err();
        assert_eq!(err.config_key(), Some("profiles.prod"));
    }

    #[test]
    fn test_profiles_must_be_mapping() {
        let err = load("keyspace: app\nmigrations_path: m\nprofiles: [dev]").unwrap_err();
        assert_eq!(err.config_key(), Some("profiles"));
    }

    #[test]
    fn test_non_string_profile_name() {
        let err = load("keyspace: app\nmigrations_path: m\nprofiles:\n  1:\n    replication: {}")
            .unwrap_err();
        assert_eq!(err.config_key(), Some("profiles"));
        assert!(err.to_string().contains("Profile names must be strings"));
    }

    #[test]
    fn test_document_must_be_mapping() {
        let err = load("- keyspace\n- app").unwrap_err();
        assert_eq!(err.config_key(), Some(""));
        assert!(err.to_string().contains("must be a mapping"));
    }

    #[test]
    fn test_malformed_yaml_is_not_wrapped() {
        let err = load("keyspace: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_absolute_migrations_path_replaces_base() {
        let config = load("keyspace: app\nmigrations_path: /srv/migrations").unwrap();
        assert_eq!(config.migrations_path(), Path::new("/srv/migrations"));
    }

    #[test]
    fn test_load_from_file_uses_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let migrations = temp_dir.path().join("migrations");
        fs::create_dir(&migrations).unwrap();
        fs::write(migrations.join("v2_second.cql"), "SELECT 2;").unwrap();
        fs::write(migrations.join("v1_first.cql"), "SELECT 1;").unwrap();
        fs::write(migrations.join("notes.txt"), "ignored").unwrap();

        let config_path = temp_dir.path().join("cqlmig.yml");
        fs::write(&config_path, "keyspace: app\nmigrations_path: migrations\n").unwrap();

        let config = MigrationConfig::load(&config_path).unwrap();
        assert_eq!(config.migrations_path(), migrations.as_path());
        let names: Vec<&str> = config.migrations().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["v1_first.cql", "v2_second.cql"]);
        assert_eq!(config.next_version(), 3);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let err = MigrationConfig::load(PathBuf::from("/nonexistent/cqlmig.yml")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
