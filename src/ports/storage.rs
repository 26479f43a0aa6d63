// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage port definition.
//!
//! This module defines the `Storage` trait, the interface through which the client
//! reads and writes raw string values in a key-value store. Adapters for concrete
//! backends (etcd, Redis, in-memory) implement this trait.

use crate::domain::{Result, StorageKey};
use std::sync::Arc;

/// A trait for key-value storage backends.
///
/// Calls are synchronous from the caller's point of view. Adapters backed by
/// network clients are free to block on their own runtime and apply their own
/// timeouts; the client core adds no retry or timeout logic of its own.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a single client can be shared across
/// threads.
///
/// # Examples
///
/// ```rust
/// use rigel::domain::{ConfigError, Result, StorageKey};
/// use rigel::ports::Storage;
///
/// struct Empty;
///
/// impl Storage for Empty {
///     fn name(&self) -> &str {
///         "empty"
///     }
///
///     fn get(&self, key: &StorageKey) -> Result<String> {
///         Err(ConfigError::KeyNotFound {
///             key: key.to_string(),
///         })
///     }
///
///     fn put(&self, _key: &StorageKey, _value: &str) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// assert!(Empty.get_str("/missing").unwrap_err().is_not_found());
/// ```
pub trait Storage: Send + Sync {
    /// Returns the name of this backend.
    ///
    /// Used in log lines and error messages, e.g. "etcd", "redis", "memory".
    fn name(&self) -> &str;

    /// Returns the full current value stored at `key`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::KeyNotFound`](crate::domain::ConfigError::KeyNotFound) - the key is absent
    /// * [`ConfigError::StorageError`](crate::domain::ConfigError::StorageError) - the backend failed
    fn get(&self, key: &StorageKey) -> Result<String>;

    /// Writes `value` at `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::StorageError`](crate::domain::ConfigError::StorageError) - the backend failed
    fn put(&self, key: &StorageKey, value: &str) -> Result<()>;

    /// Retrieves a value for a key given as a string slice.
    ///
    /// Equivalent to `get(&StorageKey::from(key))`.
    fn get_str(&self, key: &str) -> Result<String> {
        self.get(&StorageKey::from(key))
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &StorageKey) -> Result<String> {
        (**self).get(key)
    }

    fn put(&self, key: &StorageKey, value: &str) -> Result<()> {
        (**self).put(key, value)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &StorageKey) -> Result<String> {
        (**self).get(key)
    }

    fn put(&self, key: &StorageKey, value: &str) -> Result<()> {
        (**self).put(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Test implementation of Storage for testing purposes
    struct TestStorage {
        values: Mutex<HashMap<String, String>>,
    }

    impl TestStorage {
        fn new() -> Self {
            Self {
                values: Mutex::new(HashMap::new()),
            }
        }
    }

    impl Storage for TestStorage {
        fn name(&self) -> &str {
            "test-storage"
        }

        fn get(&self, key: &StorageKey) -> Result<String> {
            self.values
                .lock()
                .unwrap()
                .get(key.as_str())
                .cloned()
                .ok_or_else(|| ConfigError::KeyNotFound {
                    key: key.to_string(),
                })
        }

        fn put(&self, key: &StorageKey, value: &str) -> Result<()> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_storage_name() {
        assert_eq!(TestStorage::new().name(), "test-storage");
    }

    #[test]
    fn test_storage_get_missing() {
        let storage = TestStorage::new();
        let err = storage.get(&StorageKey::from("/nope")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_storage_put_then_get() {
        let storage = TestStorage::new();
        storage.put(&StorageKey::from("/k"), "v1").unwrap();
        storage.put(&StorageKey::from("/k"), "v2").unwrap();
        assert_eq!(storage.get_str("/k").unwrap(), "v2");
    }

    #[test]
    fn test_storage_through_arc_and_box() {
        let shared: Arc<dyn Storage> = Arc::new(TestStorage::new());
        shared.put(&StorageKey::from("/a"), "1").unwrap();
        assert_eq!(shared.name(), "test-storage");
        assert_eq!(shared.get_str("/a").unwrap(), "1");

        let boxed: Box<dyn Storage> = Box::new(TestStorage::new());
        assert!(boxed.get_str("/a").is_err());
    }

    #[test]
    fn test_storage_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn Storage>>();
        assert_send_sync::<Arc<dyn Storage>>();
    }
}
