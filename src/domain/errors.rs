// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration client.
//!
//! Every failure the client can report is a variant of [`ConfigError`]. Variants
//! carry the storage key, field or schema involved so a failure can be diagnosed
//! without retrying. The core never retries on its own.

use crate::domain::schema::FieldType;
use std::num::ParseIntError;
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// # Examples
///
/// ```
/// use rigel::domain::errors::ConfigError;
///
/// fn fetch() -> Result<String, ConfigError> {
///     Err(ConfigError::KeyNotFound {
///         key: "/remiges/rigel/conf/app/1/port".to_string(),
///     })
/// }
///
/// assert!(fetch().unwrap_err().is_not_found());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The storage backend holds no value for the key.
    #[error("Key not found in storage: {key}")]
    KeyNotFound {
        /// The storage key that was requested
        key: String,
    },

    /// The storage backend failed to serve a request.
    #[error("Storage backend '{backend}' error: {message}")]
    StorageError {
        /// Name of the backend (e.g. "etcd", "redis", "memory")
        backend: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A stored schema field list is not well formed.
    #[error("Failed to decode value at '{key}': {message}")]
    DecodeError {
        /// The storage key holding the malformed value
        key: String,
        /// The error message
        message: String,
        /// The underlying decoding error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A schema field list could not be serialized.
    #[error("Failed to encode schema fields: {message}")]
    EncodeError {
        /// The error message
        message: String,
        /// The underlying encoding error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A raw value cannot be coerced to its declared type.
    #[error("Value '{value}' is not a valid {expected}: {source}")]
    TypeMismatch {
        /// The declared field type
        expected: FieldType,
        /// The raw value that failed to coerce
        value: String,
        /// The underlying parse error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Resolving a single schema field failed.
    #[error("Failed to resolve field '{field}': {source}")]
    FieldResolution {
        /// Name of the field being resolved
        field: String,
        /// The failure that aborted resolution
        #[source]
        source: Box<ConfigError>,
    },

    /// A write targeted a field the schema does not declare.
    #[error("Schema '{schema}' version {version} has no field '{field}'")]
    UnknownField {
        /// Schema name
        schema: String,
        /// Schema version
        version: u32,
        /// The undeclared field name
        field: String,
    },

    /// The resolved values do not fit the destination type.
    #[error("Failed to bind configuration for schema '{schema}' version {version}: {source}")]
    BindError {
        /// Schema name
        schema: String,
        /// Schema version
        version: u32,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// Client settings are missing or invalid.
    #[error("Invalid client settings: {message}")]
    SettingsError {
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a `TypeMismatch` error for a value that is not an integer.
    pub fn from_parse_int_error(value: &str, err: ParseIntError) -> Self {
        ConfigError::TypeMismatch {
            expected: FieldType::Int,
            value: value.to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a `TypeMismatch` error for a value that is not a boolean.
    pub fn from_parse_bool_error(value: &str, err: ParseBoolError) -> Self {
        ConfigError::TypeMismatch {
            expected: FieldType::Bool,
            value: value.to_string(),
            source: Box::new(err),
        }
    }

    /// Wraps an error with the name of the field that was being resolved.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        ConfigError::FieldResolution {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Returns `true` if the storage backend reported a missing key, looking
    /// through field resolution wrappers.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::KeyNotFound { .. } => true,
            ConfigError::FieldResolution { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Returns `true` if a value failed type coercion, looking through field
    /// resolution wrappers.
    pub fn is_type_mismatch(&self) -> bool {
        match self {
            ConfigError::TypeMismatch { .. } => true,
            ConfigError::FieldResolution { source, .. } => source.is_type_mismatch(),
            _ => false,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
