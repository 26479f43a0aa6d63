// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory storage adapter.
//!
//! Keeps values in a process-local map. Useful for tests and for running the
//! client without a remote store.

use crate::domain::{ConfigError, Result, StorageKey};
use crate::ports::Storage;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// Storage adapter backed by a `HashMap` behind a `RwLock`.
///
/// # Examples
///
/// ```rust
/// use rigel::adapters::MemoryStorage;
/// use rigel::domain::StorageKey;
/// use rigel::ports::Storage;
///
/// let storage = MemoryStorage::new();
/// storage.put(&StorageKey::from("/app/port"), "8080").unwrap();
/// assert_eq!(storage.get_str("/app/port").unwrap(), "8080");
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `values`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rigel::adapters::MemoryStorage;
    /// use std::collections::HashMap;
    ///
    /// let mut values = HashMap::new();
    /// values.insert("/k".to_string(), "v".to_string());
    /// let storage = MemoryStorage::with_values(values);
    /// assert_eq!(storage.len(), 1);
    /// ```
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().ok().and_then(|mut v| v.remove(key))
    }

    /// Returns a sorted copy of everything stored.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values
            .read()
            .map(|v| v.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }

    fn poisoned() -> ConfigError {
        ConfigError::StorageError {
            backend: "memory".to_string(),
            message: "Storage lock poisoned".to_string(),
            source: None,
        }
    }
}

impl Storage for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &StorageKey) -> Result<String> {
        let values = self.values.read().map_err(|_| Self::poisoned())?;
        values
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_string(),
            })
    }

    fn put(&self, key: &StorageKey, value: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| Self::poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
