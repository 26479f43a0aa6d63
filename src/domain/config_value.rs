// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed configuration values and string coercion.
//!
//! Values are stored as raw strings. [`coerce`] turns a raw string into a
//! [`ConfigValue`] according to the field's declared [`FieldType`].

use crate::domain::errors::{ConfigError, Result};
use crate::domain::schema::FieldType;
use serde::Serialize;
use std::fmt;

/// A resolved configuration value.
///
/// Serializes as the bare JSON string, number or boolean so that a map of values
/// reads like an ordinary configuration document.
///
/// # Examples
///
/// ```
/// use rigel::domain::{coerce, ConfigValue, FieldType};
///
/// let value = coerce("42", &FieldType::Int).unwrap();
/// assert_eq!(value, ConfigValue::Int(42));
/// assert_eq!(value.as_i64(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A string value
    String(String),
    /// A signed integer value
    Int(i64),
    /// A boolean value
    Bool(bool),
}

impl ConfigValue {
    /// Returns the string if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Int(n)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Int(n) => write!(f, "{}", n),
            ConfigValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Converts a raw stored string into a typed value.
///
/// - [`FieldType::Int`]: base-10 signed 64-bit integer, optional sign.
/// - [`FieldType::Bool`]: `1 t T TRUE true True` or `0 f F FALSE false False`.
/// - [`FieldType::String`] and [`FieldType::Unknown`]: the raw string unchanged.
///
/// # Errors
///
/// Returns [`ConfigError::TypeMismatch`] when an `int` or `bool` value does not
/// parse. Other types never fail.
///
/// # Examples
///
/// ```
/// use rigel::domain::{coerce, ConfigValue, FieldType};
///
/// assert_eq!(coerce("true", &FieldType::Bool).unwrap(), ConfigValue::Bool(true));
/// assert!(coerce("abc", &FieldType::Int).is_err());
/// assert_eq!(
///     coerce("x", &FieldType::from("unknown-tag")).unwrap(),
///     ConfigValue::from("x")
/// );
/// ```
pub fn coerce(raw: &str, field_type: &FieldType) -> Result<ConfigValue> {
    match field_type {
        FieldType::Int => raw
            .parse::<i64>()
            .map(ConfigValue::Int)
            .map_err(|e| ConfigError::from_parse_int_error(raw, e)),
        FieldType::Bool => parse_bool(raw).map(ConfigValue::Bool),
        FieldType::String | FieldType::Unknown(_) => Ok(ConfigValue::String(raw.to_string())),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => raw
            .parse::<bool>()
            .map_err(|e| ConfigError::from_parse_bool_error(raw, e)),
    }
}

impl FieldType {
    /// Coerces a raw value to this type. See [`coerce`].
    pub fn coerce(&self, raw: &str) -> Result<ConfigValue> {
        coerce(raw, self)
    }
}
