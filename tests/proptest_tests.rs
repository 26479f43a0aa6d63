// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests check key construction and value coercion over generated
//! inputs.

use proptest::prelude::*;
use rigel::domain::{coerce, ConfigValue, FieldType, KeyPaths};

const SEGMENT: &str = "[a-zA-Z0-9_.-]{1,16}";

// Key construction is pure
proptest! {
    #[test]
    fn test_key_paths_are_deterministic(
        name in SEGMENT,
        version in any::<u32>(),
        field in SEGMENT,
    ) {
        let paths = KeyPaths::default();
        prop_assert_eq!(
            paths.conf_key_path(&name, version, &field),
            paths.conf_key_path(&name, version, &field)
        );
        prop_assert_eq!(
            paths.schema_fields_path(&name, version),
            paths.schema_fields_path(&name, version)
        );
    }
}

// Distinct (name, version, field) triples never share a value key
proptest! {
    #[test]
    fn test_conf_keys_do_not_collide(
        a in (SEGMENT, any::<u32>(), SEGMENT),
        b in (SEGMENT, any::<u32>(), SEGMENT),
    ) {
        prop_assume!(a != b);
        let paths = KeyPaths::default();
        prop_assert_ne!(
            paths.conf_key_path(&a.0, a.1, &a.2),
            paths.conf_key_path(&b.0, b.1, &b.2)
        );
    }
}

// Schema keys never coincide with value keys
proptest! {
    #[test]
    fn test_schema_and_conf_keys_are_disjoint(
        name in SEGMENT,
        version in any::<u32>(),
        other in SEGMENT,
        other_version in any::<u32>(),
        field in SEGMENT,
    ) {
        let paths = KeyPaths::default();
        prop_assert_ne!(
            paths.schema_fields_path(&name, version),
            paths.conf_key_path(&other, other_version, &field)
        );
    }
}

// Value keys nest under the prefix
proptest! {
    #[test]
    fn test_conf_key_layout(
        prefix in "(/[a-z]{1,8}){1,3}",
        name in SEGMENT,
        version in any::<u32>(),
        field in SEGMENT,
    ) {
        let key = KeyPaths::new(format!("{}/", prefix)).conf_key_path(&name, version, &field);
        prop_assert_eq!(
            key.as_str(),
            format!("{}/conf/{}/{}/{}", prefix, name, version, field)
        );
    }
}

// Any i64 rendered in base 10 coerces back to itself
proptest! {
    #[test]
    fn test_int_coercion_accepts_decimal(n in any::<i64>()) {
        prop_assert_eq!(coerce(&n.to_string(), &FieldType::Int).unwrap(), ConfigValue::Int(n));
    }
}

// Strings with a non-digit character are not ints
proptest! {
    #[test]
    fn test_int_coercion_rejects_non_numeric(s in "[0-9]{0,4}[a-zA-Z ._][0-9]{0,4}") {
        let err = coerce(&s, &FieldType::Int).unwrap_err();
        prop_assert!(err.is_type_mismatch());
    }
}

// Only the fixed token set parses as bool
proptest! {
    #[test]
    fn test_bool_coercion_token_set(s in "\\PC{0,6}") {
        let expected = match s.as_str() {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
            _ => None,
        };
        match coerce(&s, &FieldType::Bool) {
            Ok(value) => prop_assert_eq!(Some(value), expected.map(ConfigValue::Bool)),
            Err(e) => {
                prop_assert!(expected.is_none());
                prop_assert!(e.is_type_mismatch());
            }
        }
    }
}

// String and unrecognized types pass values through unchanged
proptest! {
    #[test]
    fn test_passthrough_types(s in "\\PC*", tag in "[a-z]{3,10}") {
        prop_assume!(tag != "int" && tag != "bool");
        let field_type = FieldType::from(tag.as_str());
        prop_assert_eq!(
            coerce(&s, &field_type).unwrap(),
            ConfigValue::String(s.clone())
        );
        prop_assert_eq!(
            coerce(&s, &FieldType::String).unwrap(),
            ConfigValue::String(s)
        );
    }
}
