// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema declarations.
//!
//! A [`Schema`] is a named, versioned, ordered list of [`Field`]s. Each field names
//! one configuration parameter and declares its [`FieldType`]. Schemas are stored
//! as a JSON array of `{"name": ..., "type": ...}` records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a configuration field.
///
/// Type tags are open strings on the wire. Tags this crate does not recognize are
/// kept verbatim in [`FieldType::Unknown`] and resolve with string semantics, so
/// an unfamiliar tag never fails resolution.
///
/// # Examples
///
/// ```
/// use rigel::domain::FieldType;
///
/// assert_eq!(FieldType::from("int"), FieldType::Int);
/// assert_eq!(FieldType::from("float"), FieldType::Unknown("float".to_string()));
/// assert_eq!(FieldType::Bool.as_str(), "bool");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// `"string"`: the raw value as-is
    String,
    /// `"int"`: a base-10 signed integer
    Int,
    /// `"bool"`: a boolean literal
    Bool,
    /// Any other tag, resolved as a string
    Unknown(String),
}

impl FieldType {
    /// Returns the wire tag of this type.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Unknown(tag) => tag,
        }
    }

    /// Returns `true` for tags without a dedicated coercion.
    pub fn is_unknown(&self) -> bool {
        matches!(self, FieldType::Unknown(_))
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        match tag {
            "string" => FieldType::String,
            "int" => FieldType::Int,
            "bool" => FieldType::Bool,
            other => FieldType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "string" | "int" | "bool" => FieldType::from(tag.as_str()),
            _ => FieldType::Unknown(tag),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One named, typed configuration parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, also the last segment of its value key
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    /// Creates a field declaration.
    ///
    /// # Examples
    ///
    /// ```
    /// use rigel::domain::{Field, FieldType};
    ///
    /// let field = Field::new("max_retries", "int");
    /// assert_eq!(field.field_type, FieldType::Int);
    /// ```
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }
}

/// A named, versioned declaration of configuration fields.
///
/// Identity is the `(name, version)` pair. A published version is treated as
/// immutable; changes are made by publishing a new version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    /// Schema name
    pub name: String,
    /// Schema version
    pub version: u32,
    /// Field declarations in iteration order
    pub fields: Vec<Field>,
    /// Optional human-readable description
    pub description: Option<String>,
}

impl Schema {
    /// Creates a schema without a description.
    pub fn new(name: impl Into<String>, version: u32, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            version,
            fields,
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
