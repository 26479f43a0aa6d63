// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests: a recording mock storage and Docker
//! detection for the backend tests.

#![allow(dead_code)]

use rigel::adapters::MemoryStorage;
use rigel::domain::{ConfigError, Result, StorageKey};
use rigel::ports::Storage;
use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// Key of the three-field schema used across tests.
pub const SCHEMA_KEY: &str = "/remiges/rigel/schema/schemaName/1/fields";

/// Field list of the three-field schema.
pub const SCHEMA_FIELDS: &str = r#"[{"name": "key1", "type": "string"}, {"name": "key2", "type": "int"}, {"name": "key3", "type": "bool"}]"#;

/// A storage backend that records every request and can be told to fail.
#[derive(Debug, Default)]
pub struct MockStorage {
    inner: MemoryStorage,
    gets: Mutex<Vec<String>>,
    puts: Mutex<Vec<(String, String)>>,
    failing_gets: Mutex<HashSet<String>>,
    failing_puts: Mutex<bool>,
}

impl MockStorage {
    /// Creates an empty mock storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value without recording it as a put.
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.inner
            .put(&StorageKey::from(key), value)
            .expect("memory put");
        self
    }

    /// Makes every `get` of `key` fail with a storage error.
    pub fn failing_get(self, key: &str) -> Self {
        self.failing_gets.lock().unwrap().insert(key.to_string());
        self
    }

    /// Makes every `put` fail with a storage error.
    pub fn failing_puts(self) -> Self {
        *self.failing_puts.lock().unwrap() = true;
        self
    }

    /// Keys requested through `get`, in order.
    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    /// Key-value pairs written through `put`, in order.
    pub fn puts(&self) -> Vec<(String, String)> {
        self.puts.lock().unwrap().clone()
    }

    /// Reads a stored value directly, bypassing recording.
    pub fn stored(&self, key: &str) -> Option<String> {
        self.inner.get_str(key).ok()
    }

    fn failure(message: &str) -> ConfigError {
        ConfigError::StorageError {
            backend: "mock".to_string(),
            message: message.to_string(),
            source: None,
        }
    }
}

impl Storage for MockStorage {
    fn name(&self) -> &str {
        "mock"
    }

    fn get(&self, key: &StorageKey) -> Result<String> {
        self.gets.lock().unwrap().push(key.to_string());
        if self.failing_gets.lock().unwrap().contains(key.as_str()) {
            return Err(Self::failure("connection reset"));
        }
        self.inner.get(key)
    }

    fn put(&self, key: &StorageKey, value: &str) -> Result<()> {
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        if *self.failing_puts.lock().unwrap() {
            return Err(Self::failure("read-only replica"));
        }
        self.inner.put(key, value)
    }
}

/// A mock storage holding the three-field schema and a value for each field.
pub fn populated_storage() -> MockStorage {
    MockStorage::new()
        .with_value(SCHEMA_KEY, SCHEMA_FIELDS)
        .with_value("/remiges/rigel/conf/schemaName/1/key1", "value1")
        .with_value("/remiges/rigel/conf/schemaName/1/key2", "2")
        .with_value("/remiges/rigel/conf/schemaName/1/key3", "true")
}

/// Cached result of Docker availability check.
static DOCKER_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Checks if Docker is available on the system.
///
/// This check is cached after the first call.
pub fn is_docker_available() -> bool {
    *DOCKER_AVAILABLE.get_or_init(|| {
        std::process::Command::new("docker")
            .args(["ps"])
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    })
}

/// Prints a warning message that a test is skipped due to Docker being unavailable.
pub fn print_docker_unavailable_warning(test_name: &str) {
    eprintln!("\n⚠️  SKIPPED: {} - Docker is not available", test_name);
    eprintln!("   To run this test, ensure Docker is installed and running.");
    eprintln!("   Installation: https://docs.docker.com/get-docker/\n");
}
