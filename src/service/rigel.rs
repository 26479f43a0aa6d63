// SPDX-License-Identifier: MIT OR Apache-2.0

//! The rigel configuration client.
//!
//! This module provides [`Rigel`], the [`ConfigService`] implementation that
//! resolves schemas and values through a [`Storage`] backend.

use crate::domain::{
    coerce, ConfigError, ConfigMap, ConfigService, ConfigValue, Field, KeyPaths, Result, Schema,
};
use crate::ports::Storage;
use crate::service::SchemaRepository;
use std::sync::Arc;

/// Configuration client bound to one storage backend and key prefix.
///
/// `Rigel` holds no mutable state after construction. Clones share the
/// underlying storage handle, so a single client can be used from many threads.
///
/// # Examples
///
/// ```rust
/// use rigel::adapters::MemoryStorage;
/// use rigel::prelude::*;
/// use rigel::service::Rigel;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Config {
///     database_url: String,
///     max_retries: i64,
///     enable_ssl: bool,
/// }
///
/// # fn main() -> Result<()> {
/// let rigel = Rigel::new(MemoryStorage::new());
/// rigel.add_schema(
///     "app",
///     1,
///     &[
///         Field::new("database_url", "string"),
///         Field::new("max_retries", "int"),
///         Field::new("enable_ssl", "bool"),
///     ],
/// )?;
/// rigel.set_config_value("app", 1, "database_url", "postgres://db/app")?;
/// rigel.set_config_value("app", 1, "max_retries", "3")?;
/// rigel.set_config_value("app", 1, "enable_ssl", "true")?;
///
/// let config: Config = rigel.load_config("app", 1, "default")?;
/// assert_eq!(config.max_retries, 3);
/// assert!(config.enable_ssl);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Rigel {
    storage: Arc<dyn Storage>,
    paths: KeyPaths,
    schemas: SchemaRepository,
}

impl Rigel {
    /// Creates a client over `storage` using the default key prefix.
    pub fn new<S: Storage + 'static>(storage: S) -> Self {
        Self::from_parts(Arc::new(storage), KeyPaths::default())
    }

    /// Creates a client from an already shared storage handle and key layout.
    pub fn from_parts(storage: Arc<dyn Storage>, paths: KeyPaths) -> Self {
        let schemas = SchemaRepository::new(Arc::clone(&storage), paths.clone());
        Self {
            storage,
            paths,
            schemas,
        }
    }

    /// Creates a new client builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rigel::adapters::MemoryStorage;
    /// use rigel::service::Rigel;
    ///
    /// # fn main() -> rigel::domain::Result<()> {
    /// let rigel = Rigel::builder()
    ///     .storage(MemoryStorage::new())
    ///     .prefix("/acme/config")
    ///     .build()?;
    /// assert_eq!(rigel.key_paths().prefix(), "/acme/config");
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> RigelBuilder {
        RigelBuilder::new()
    }

    /// The storage backend this client reads from.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// The key layout this client uses.
    pub fn key_paths(&self) -> &KeyPaths {
        &self.paths
    }

    /// The schema repository sharing this client's storage.
    pub fn schemas(&self) -> &SchemaRepository {
        &self.schemas
    }

    fn resolve_field(&self, schema: &Schema, field: &Field) -> Result<ConfigValue> {
        if field.field_type.is_unknown() {
            tracing::warn!(
                "Field '{}' of schema '{}' has unrecognized type '{}', keeping raw string",
                field.name,
                schema.name,
                field.field_type
            );
        }

        let raw = self.get_config_value(&schema.name, schema.version, &field.name)?;
        coerce(&raw, &field.field_type)
    }
}

impl std::fmt::Debug for Rigel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rigel")
            .field("storage", &self.storage.name())
            .field("prefix", &self.paths.prefix())
            .finish()
    }
}

impl ConfigService for Rigel {
    fn get_schema(&self, name: &str, version: u32) -> Result<Schema> {
        self.schemas.get_schema(name, version)
    }

    fn add_schema(&self, name: &str, version: u32, fields: &[Field]) -> Result<()> {
        self.schemas.add_schema(name, version, fields)
    }

    fn get_config_value(&self, name: &str, version: u32, field: &str) -> Result<String> {
        let key = self.paths.conf_key_path(name, version, field);
        tracing::trace!("Reading '{}' from {}", key, self.storage.name());
        self.storage.get(&key)
    }

    fn set_config_value(&self, name: &str, version: u32, field: &str, raw: &str) -> Result<()> {
        let schema = self.schemas.get_schema(name, version)?;
        let declared = schema
            .field(field)
            .ok_or_else(|| ConfigError::UnknownField {
                schema: name.to_string(),
                version,
                field: field.to_string(),
            })?;

        coerce(raw, &declared.field_type).map_err(|e| e.in_field(field))?;

        let key = self.paths.conf_key_path(name, version, field);
        tracing::info!("Setting '{}'", key);
        self.storage.put(&key, raw)
    }

    fn resolve(&self, name: &str, version: u32) -> Result<ConfigMap> {
        let schema = self.schemas.get_schema(name, version)?;

        let mut map = ConfigMap::new();
        for field in &schema.fields {
            let value = self
                .resolve_field(&schema, field)
                .map_err(|e| e.in_field(field.name.as_str()))?;
            map.insert(field.name.as_str(), value);
        }

        tracing::debug!(
            "Resolved {} fields of schema '{}' v{}",
            map.len(),
            name,
            version
        );
        Ok(map)
    }
}

/// Builder for constructing a [`Rigel`] client.
///
/// # Examples
///
/// ```rust
/// use rigel::adapters::MemoryStorage;
/// use rigel::service::RigelBuilder;
///
/// # fn main() -> rigel::domain::Result<()> {
/// let rigel = RigelBuilder::new().storage(MemoryStorage::new()).build()?;
/// assert_eq!(rigel.key_paths().prefix(), "/remiges/rigel");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct RigelBuilder {
    storage: Option<Arc<dyn Storage>>,
    prefix: Option<String>,
}

impl RigelBuilder {
    /// Creates a new builder with no storage and the default prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storage backend.
    pub fn storage<S: Storage + 'static>(self, storage: S) -> Self {
        self.shared_storage(Arc::new(storage))
    }

    /// Sets an already shared storage backend.
    pub fn shared_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Overrides the key prefix (default `/remiges/rigel`).
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SettingsError`] if no storage was set or the
    /// prefix is empty.
    pub fn build(self) -> Result<Rigel> {
        let storage = self.storage.ok_or_else(|| ConfigError::SettingsError {
            message: "No storage backend configured".to_string(),
            source: None,
        })?;

        let paths = match self.prefix {
            Some(prefix) => {
                let paths = KeyPaths::new(prefix);
                if paths.prefix().is_empty() {
                    return Err(ConfigError::SettingsError {
                        message: "Key prefix must not be empty".to_string(),
                        source: None,
                    });
                }
                paths
            }
            None => KeyPaths::default(),
        };

        Ok(Rigel::from_parts(storage, paths))
    }
}
