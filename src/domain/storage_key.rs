// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage keys and the key path builder.
//!
//! Schema metadata and configuration values live under a shared namespace prefix:
//!
//! - `<prefix>/schema/<name>/<version>/fields` holds a schema's field list
//! - `<prefix>/conf/<name>/<version>/<field>` holds one field's raw value
//!
//! The two kinds of key sit under different second segments, so a field named
//! `fields` never collides with schema metadata.

use std::fmt;

/// The namespace prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "/remiges/rigel";

/// A type-safe wrapper for storage keys.
///
/// # Examples
///
/// ```
/// use rigel::domain::StorageKey;
///
/// let key = StorageKey::from("/remiges/rigel/conf/app/1/port");
/// assert_eq!(key.as_str(), "/remiges/rigel/conf/app/1/port");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    /// Creates a new `StorageKey` from a `String`.
    pub fn new(key: String) -> Self {
        StorageKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `StorageKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for StorageKey {
    fn from(s: String) -> Self {
        StorageKey(s)
    }
}

impl From<&str> for StorageKey {
    fn from(s: &str) -> Self {
        StorageKey(s.to_string())
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds storage keys under a fixed namespace prefix.
///
/// Both builders are pure: the same inputs always give the same key and no I/O
/// takes place. Names are used verbatim as path segments; keys stay distinct for
/// any names that do not themselves contain `/`.
///
/// # Examples
///
/// ```
/// use rigel::domain::KeyPaths;
///
/// let paths = KeyPaths::default();
/// assert_eq!(
///     paths.schema_fields_path("app", 1).as_str(),
///     "/remiges/rigel/schema/app/1/fields"
/// );
/// assert_eq!(
///     paths.conf_key_path("app", 1, "port").as_str(),
///     "/remiges/rigel/conf/app/1/port"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPaths {
    prefix: String,
}

impl KeyPaths {
    /// Creates a builder for the given prefix. A trailing `/` is dropped.
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        while prefix.ends_with('/') {
            prefix.pop();
        }
        Self { prefix }
    }

    /// Returns the namespace prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key holding the field list of schema `name` at `version`.
    pub fn schema_fields_path(&self, name: &str, version: u32) -> StorageKey {
        StorageKey(format!("{}/schema/{}/{}/fields", self.prefix, name, version))
    }

    /// Key holding the raw value of `field` for schema `name` at `version`.
    pub fn conf_key_path(&self, name: &str, version: u32, field: &str) -> StorageKey {
        StorageKey(format!(
            "{}/conf/{}/{}/{}",
            self.prefix, name, version, field
        ))
    }
}

impl Default for KeyPaths {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_schema_fields_path() {
        let paths = KeyPaths::default();
        assert_eq!(
            paths.schema_fields_path("testSchema", 1).as_str(),
            "/remiges/rigel/schema/testSchema/1/fields"
        );
    }

    #[test]
    fn test_conf_key_path() {
        let paths = KeyPaths::default();
        assert_eq!(
            paths.conf_key_path("testSchema", 1, "testConf").as_str(),
            "/remiges/rigel/conf/testSchema/1/testConf"
        );
    }

    #[test]
    fn test_custom_prefix() {
        let paths = KeyPaths::new("/acme/config");
        assert_eq!(
            paths.conf_key_path("billing", 7, "currency").as_str(),
            "/acme/config/conf/billing/7/currency"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let paths = KeyPaths::new("/acme/config//");
        assert_eq!(paths.prefix(), "/acme/config");
        assert_eq!(
            paths.schema_fields_path("billing", 2).as_str(),
            "/acme/config/schema/billing/2/fields"
        );
    }

    #[test]
    fn test_field_named_fields_does_not_collide() {
        let paths = KeyPaths::default();
        assert_ne!(
            paths.schema_fields_path("app", 1),
            paths.conf_key_path("app", 1, "fields")
        );
    }

    #[test]
    fn test_storage_key_display_and_conversions() {
        let key = StorageKey::from("a/b");
        assert_eq!(format!("{}", key), "a/b");
        let s: &str = key.as_ref();
        assert_eq!(s, "a/b");
        let inner: String = key.clone().into();
        assert_eq!(inner, "a/b");
        assert_eq!(key.into_string(), "a/b");
    }

    #[test]
    fn test_storage_key_hash() {
        let mut map = HashMap::new();
        map.insert(StorageKey::from("k"), 1);
        assert_eq!(map.get(&StorageKey::new("k".to_string())), Some(&1));
        assert_eq!(map.get(&StorageKey::from("other")), None);
    }
}
