// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema storage.
//!
//! A schema's field list is stored as a JSON array at
//! `<prefix>/schema/<name>/<version>/fields`.

use crate::domain::{ConfigError, Field, KeyPaths, Result, Schema, StorageKey};
use crate::ports::Storage;
use std::sync::Arc;

/// Reads and writes schema field lists through the storage port.
///
/// # Examples
///
/// ```rust
/// use rigel::adapters::MemoryStorage;
/// use rigel::domain::{Field, KeyPaths};
/// use rigel::service::SchemaRepository;
/// use std::sync::Arc;
///
/// # fn main() -> rigel::domain::Result<()> {
/// let repo = SchemaRepository::new(Arc::new(MemoryStorage::new()), KeyPaths::default());
/// repo.add_schema("app", 1, &[Field::new("port", "int")])?;
/// assert_eq!(repo.get_schema("app", 1)?.fields.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SchemaRepository {
    storage: Arc<dyn Storage>,
    paths: KeyPaths,
}

impl SchemaRepository {
    /// Creates a repository over `storage`, building keys with `paths`.
    pub fn new(storage: Arc<dyn Storage>, paths: KeyPaths) -> Self {
        Self { storage, paths }
    }

    /// Reads and decodes the schema `name` at `version`.
    ///
    /// # Errors
    ///
    /// * whatever the storage port reports, unchanged (e.g. `KeyNotFound`)
    /// * [`ConfigError::DecodeError`] when the stored value is not a JSON field list
    pub fn get_schema(&self, name: &str, version: u32) -> Result<Schema> {
        let key = self.paths.schema_fields_path(name, version);
        tracing::debug!("Fetching schema fields from '{}'", key);

        let raw = self.storage.get(&key)?;
        let fields = decode_fields(&key, &raw)?;
        Ok(Schema::new(name, version, fields))
    }

    /// Encodes `fields` and writes them for `name` at `version`.
    ///
    /// An existing field list for the same pair is overwritten.
    pub fn add_schema(&self, name: &str, version: u32, fields: &[Field]) -> Result<()> {
        let key = self.paths.schema_fields_path(name, version);
        let encoded = encode_fields(fields)?;

        tracing::info!("Storing {} schema fields at '{}'", fields.len(), key);
        tracing::debug!("Fields: {}", encoded);
        self.storage.put(&key, &encoded)
    }
}

impl std::fmt::Debug for SchemaRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRepository")
            .field("storage", &self.storage.name())
            .field("prefix", &self.paths.prefix())
            .finish()
    }
}

/// Serializes a field list in the stored JSON format.
pub fn encode_fields(fields: &[Field]) -> Result<String> {
    serde_json::to_string(fields).map_err(|e| ConfigError::EncodeError {
        message: format!("Failed to marshal fields: {}", e),
        source: Some(Box::new(e)),
    })
}

/// Parses a stored JSON field list read from `key`.
pub fn decode_fields(key: &StorageKey, raw: &str) -> Result<Vec<Field>> {
    serde_json::from_str(raw).map_err(|e| ConfigError::DecodeError {
        key: key.to_string(),
        message: format!("Invalid schema field list: {}", e),
        source: Some(Box::new(e)),
    })
}
