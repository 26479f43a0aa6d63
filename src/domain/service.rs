// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! This module defines the `ConfigService` trait, the interface applications use to
//! register schemas and resolve typed configuration from them.

use crate::domain::{ConfigError, ConfigMap, Field, Result, Schema};
use serde::de::DeserializeOwned;

/// The main configuration service trait.
///
/// Implementors provide schema storage and per-schema resolution into a
/// [`ConfigMap`]. Binding into an application type is provided on top of
/// [`ConfigService::resolve`].
///
/// # Examples
///
/// ```rust
/// use rigel::domain::{ConfigMap, ConfigService, Field, Result, Schema};
/// use serde::Deserialize;
///
/// struct Fixed;
///
/// impl ConfigService for Fixed {
///     fn get_schema(&self, name: &str, version: u32) -> Result<Schema> {
///         Ok(Schema::new(name, version, vec![Field::new("port", "int")]))
///     }
///
///     fn add_schema(&self, _name: &str, _version: u32, _fields: &[Field]) -> Result<()> {
///         Ok(())
///     }
///
///     fn get_config_value(&self, _name: &str, _version: u32, _field: &str) -> Result<String> {
///         Ok("8080".to_string())
///     }
///
///     fn set_config_value(&self, _: &str, _: u32, _: &str, _: &str) -> Result<()> {
///         Ok(())
///     }
///
///     fn resolve(&self, _name: &str, _version: u32) -> Result<ConfigMap> {
///         let mut map = ConfigMap::new();
///         map.insert("port", 8080i64);
///         Ok(map)
///     }
/// }
///
/// #[derive(Deserialize)]
/// struct Server {
///     port: u16,
/// }
///
/// let server: Server = Fixed.load_config("server", 1, "default").unwrap();
/// assert_eq!(server.port, 8080);
/// ```
pub trait ConfigService {
    /// Reads the schema `name` at `version`.
    fn get_schema(&self, name: &str, version: u32) -> Result<Schema>;

    /// Registers the field list of schema `name` at `version`, replacing any
    /// field list already stored for that pair.
    fn add_schema(&self, name: &str, version: u32, fields: &[Field]) -> Result<()>;

    /// Reads the raw stored value of one field.
    fn get_config_value(&self, name: &str, version: u32, field: &str) -> Result<String>;

    /// Validates a raw value against the field's declared type and stores it.
    fn set_config_value(&self, name: &str, version: u32, field: &str, raw: &str)
        -> Result<()>;

    /// Resolves every field of the schema into a typed map.
    ///
    /// Fails on the first field that cannot be fetched or coerced.
    fn resolve(&self, name: &str, version: u32) -> Result<ConfigMap>;

    /// Resolves the schema and binds the values into `T`.
    ///
    /// `config_name` names the configuration being loaded. It is recorded for
    /// diagnostics and does not take part in key construction.
    fn load_config<T>(&self, schema_name: &str, schema_version: u32, config_name: &str) -> Result<T>
    where
        T: DeserializeOwned,
        Self: Sized,
    {
        let span = tracing::debug_span!(
            "load_config",
            schema = schema_name,
            version = schema_version,
            config = config_name
        );
        let _enter = span.enter();

        let map = self.resolve(schema_name, schema_version)?;
        let config = map.bind().map_err(|e| ConfigError::BindError {
            schema: schema_name.to_string(),
            version: schema_version,
            source: e,
        })?;
        tracing::debug!("Bound {} fields", map.len());
        Ok(config)
    }

    /// Like [`ConfigService::load_config`], writing into `destination`.
    ///
    /// `destination` is only assigned when resolution and binding both succeed;
    /// on error it keeps its previous contents.
    fn load_config_into<T>(
        &self,
        schema_name: &str,
        schema_version: u32,
        config_name: &str,
        destination: &mut T,
    ) -> Result<()>
    where
        T: DeserializeOwned,
        Self: Sized,
    {
        *destination = self.load_config(schema_name, schema_version, config_name)?;
        Ok(())
    }
}
