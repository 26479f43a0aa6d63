// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for loading client settings from files.

#![cfg(feature = "yaml")]

use rigel::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn create_temp_yaml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_from_explicit_file() {
    let file = create_temp_yaml(
        r#"
backend: memory
prefix: /acme/config/
"#,
    );

    let settings = ClientSettings::load(Some(file.path())).unwrap();
    assert_eq!(settings.backend, Backend::Memory);
    assert_eq!(settings.key_paths().prefix(), "/acme/config");

    let rigel = settings.connect().unwrap();
    rigel
        .add_schema("app", 1, &[Field::new("port", "int")])
        .unwrap();
    assert_eq!(
        rigel
            .storage()
            .get_str("/acme/config/schema/app/1/fields")
            .unwrap(),
        r#"[{"name":"port","type":"int"}]"#
    );
}

#[test]
fn test_load_file_with_all_settings() {
    let file = create_temp_yaml(
        r#"
backend: etcd
endpoints:
  - etcd-0:2379
  - etcd-1:2379
prefix: /remiges/rigel
dial_timeout_secs: 10
request_timeout_secs: 3
"#,
    );

    let settings = ClientSettings::from_file(file.path()).unwrap();
    assert_eq!(settings.endpoints.len(), 2);
    assert_eq!(settings.dial_timeout_secs, 10);
    assert_eq!(settings.request_timeout_secs, 3);
    assert!(settings.check().is_ok());
}

#[test]
fn test_load_file_unknown_backend() {
    let file = create_temp_yaml("backend: consul\n");
    let err = ClientSettings::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::SettingsError { .. }));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ClientSettings::from_file(dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::IoError(_)));
}

#[test]
fn test_settings_file_without_endpoints_fails_check() {
    let file = create_temp_yaml("backend: redis\nendpoints: []\n");
    let settings = ClientSettings::from_file(file.path()).unwrap();
    assert!(matches!(
        settings.connect().unwrap_err(),
        ConfigError::SettingsError { .. }
    ));
}

#[test]
fn test_settings_serialize_round_trip() {
    let settings = ClientSettings {
        backend: Backend::Memory,
        ..ClientSettings::default()
    };
    let yaml = serde_yaml::to_string(&settings).unwrap();
    assert!(yaml.contains("backend: memory"));
    assert_eq!(ClientSettings::from_yaml_str(&yaml).unwrap(), settings);
}
