// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resolved field-name to value mapping.
//!
//! A [`ConfigMap`] is built fresh for each resolution. Binding goes through a
//! JSON document: the map is serialized to a `serde_json::Value` object and the
//! destination type is deserialized from it, matching map keys to the
//! destination's serde field names.

use crate::domain::config_value::ConfigValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mapping from field name to resolved value.
///
/// # Examples
///
/// ```
/// use rigel::domain::{ConfigMap, ConfigValue};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Limits {
///     max_days: i64,
/// }
///
/// let mut map = ConfigMap::new();
/// map.insert("max_days", ConfigValue::Int(30));
///
/// let limits: Limits = map.bind().unwrap();
/// assert_eq!(limits.max_days, 30);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigMap(BTreeMap<String, ConfigValue>);

impl ConfigMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a value, returning the previous value for the name, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Returns the value for a field name.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.0.get(name)
    }

    /// Returns `true` if the map has a value for the field name.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of resolved fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no field has been resolved.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.0.iter()
    }

    /// Converts the map into a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(name, value)| (name.clone(), value_to_json(value)))
                .collect(),
        )
    }

    /// Deserializes a destination type from the map.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the destination's fields cannot absorb
    /// the map, for example when a required field is absent or a value has the
    /// wrong type.
    pub fn bind<T: DeserializeOwned>(&self) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }
}

fn value_to_json(value: &ConfigValue) -> serde_json::Value {
    match value {
        ConfigValue::String(s) => serde_json::Value::String(s.clone()),
        ConfigValue::Int(n) => serde_json::Value::from(*n),
        ConfigValue::Bool(b) => serde_json::Value::Bool(*b),
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ConfigMap {
    type Item = (String, ConfigValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
