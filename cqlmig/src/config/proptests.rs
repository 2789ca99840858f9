//! Property-based tests for configuration validation.

use super::entry::{ConfigEntry, ValueType};
use super::schema::MigrationConfig;
use super::validator::validate_identifier;
use crate::template::{format_migration_string, validate_template_fields, MigrationFields};
use proptest::prelude::*;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::Path;

// Strategy for generating identifiers
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,30}"
}

// Strategy for generating field values without braces
fn field_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.-]{0,20}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn identifiers_are_accepted(id in identifier_strategy()) {
        prop_assert!(validate_identifier(&id).is_ok());
    }

    #[test]
    fn leading_digit_or_underscore_is_rejected(
        first in "[0-9_]",
        rest in "[A-Za-z0-9_]{0,10}"
    ) {
        let id = format!("{first}{rest}");
        prop_assert!(validate_identifier(&id).is_err());
    }

    #[test]
    fn embedded_invalid_character_is_rejected(
        head in identifier_strategy(),
        bad in "[ .\\-/:!@#]",
        tail in "[A-Za-z0-9_]{0,5}"
    ) {
        let id = format!("{head}{bad}{tail}");
        prop_assert!(validate_identifier(&id).is_err());
    }

    // Any valid keyspace round-trips through loading unchanged
    #[test]
    fn valid_keyspace_is_loaded(keyspace in identifier_strategy()) {
        let yaml = format!("keyspace: {keyspace}\nmigrations_path: m");
        // YAML would read these as booleans or null
        prop_assume!(!matches!(
            keyspace.to_lowercase().as_str(),
            "y" | "n" | "yes" | "no" | "on" | "off" | "true" | "false" | "null"
        ));
        let config = MigrationConfig::from_yaml(&yaml, Path::new("/base")).unwrap();
        prop_assert_eq!(config.keyspace(), keyspace.as_str());
    }

    // Rendering is literal text plus values, in order
    #[test]
    fn rendering_substitutes_values(
        prefix in "[a-z_]{0,10}",
        keyspace in field_value_strategy(),
        desc in field_value_strategy(),
        next_version in 1usize..100_000
    ) {
        let template = format!("{prefix}{{keyspace}}/{{next_version}}/{{desc}}");
        prop_assert!(validate_template_fields(&template).is_ok());

        let fields: BTreeMap<String, String> = MigrationFields {
            desc: desc.clone(),
            keyspace: keyspace.clone(),
            next_version,
            ..Default::default()
        }
        .into();
        let rendered = format_migration_string(&template, &fields).unwrap();
        prop_assert_eq!(rendered, format!("{prefix}{keyspace}/{next_version}/{desc}"));
    }

    // Unknown field names are always rejected at validation time
    #[test]
    fn unknown_fields_are_rejected(name in "[a-z_]{1,12}") {
        prop_assume!(!crate::template::MIGRATION_TEMPLATE_FIELDS.contains(&name.as_str()));
        let template = format!("v{{{name}}}");
        prop_assert!(validate_template_fields(&template).is_err());
    }

    // A default is used exactly when the key is absent or null
    #[test]
    fn default_applies_only_when_absent(present in any::<bool>(), value in any::<bool>()) {
        let mut data = Mapping::new();
        if present {
            data.insert(Value::String("flag".into()), Value::Bool(value));
        }
        let resolved = ConfigEntry::new("flag")
            .default(Value::Bool(!value))
            .of_type(ValueType::Bool)
            .extract(&data)
            .unwrap();
        prop_assert_eq!(resolved, Value::Bool(if present { value } else { !value }));
    }
}
