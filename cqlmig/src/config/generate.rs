//! Scaffolding of new migration files from the configured templates.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;

use crate::config::schema::MigrationConfig;
use crate::error::{Error, Result};
use crate::template::{format_migration_string, MigrationFields};

static NON_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\W\s]+").expect("Invalid description regex"));

/// A rendered, not yet written, migration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMigration {
    /// File name including the `.cql` extension.
    pub file_name: String,
    /// Initial file content.
    pub text: String,
}

/// Turns a free-form description into a file-name friendly one.
///
/// # Examples
///
/// ```
/// use cqlmig::config::clean_description;
///
/// assert_eq!(clean_description("Add users table!"), "Add_users_table_");
/// ```
#[must_use]
pub fn clean_description(description: &str) -> String {
    NON_WORD_REGEX.replace_all(description, "_").into_owned()
}

impl MigrationConfig {
    /// Template field values for a new migration.
    #[must_use]
    pub fn migration_fields(&self, description: &str, now: DateTime<Utc>) -> MigrationFields {
        MigrationFields {
            desc: clean_description(description),
            full_desc: description.to_string(),
            next_version: self.next_version(),
            date: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            keyspace: self.keyspace.clone(),
        }
    }

    /// Renders the file name and content of the next migration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if a template cannot be rendered.
    pub fn new_migration(&self, description: &str, now: DateTime<Utc>) -> Result<NewMigration> {
        let fields: BTreeMap<String, String> = self.migration_fields(description, now).into();
        Ok(NewMigration {
            file_name: format!(
                "{}.cql",
                format_migration_string(&self.new_migration_name, &fields)?
            ),
            text: format_migration_string(&self.new_migration_text, &fields)?,
        })
    }

    /// Writes the next migration into the migrations directory.
    ///
    /// The directory is created if needed. Returns the path of the new file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the rendered name is not a plain
    /// file name or the file already exists, and I/O errors from writing.
    /// The file is created exclusively, so an existing file is never
    /// truncated.
    pub fn generate_migration(&self, description: &str) -> Result<PathBuf> {
        let migration = self.new_migration(description, Utc::now())?;

        let is_plain_name = !migration.file_name.contains(['/', '\\'])
            && !migration.file_name.starts_with('.');
        let path = self.migrations_path.join(&migration.file_name);
        if !is_plain_name {
            return Err(Error::InvalidPath {
                path,
                reason: "Migration name must be a plain file name".to_string(),
            });
        }

        fs::create_dir_all(&self.migrations_path)?;
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::InvalidPath {
                    path,
                    reason: "Migration file already exists".to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(migration.text.as_bytes())?;
        log::info!("Created migration {}", path.display());
        Ok(path)
    }
}
