// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and logic.
//!
//! This module holds the schema model, storage key construction, value coercion
//! and the resolved value map. It performs no I/O; storage is reached through the
//! ports layer.

pub mod config_map;
pub mod config_value;
pub mod errors;
pub mod schema;
pub mod service;
pub mod storage_key;

// Re-export commonly used types
pub use config_map::ConfigMap;
pub use config_value::{coerce, ConfigValue};
pub use errors::{ConfigError, Result};
pub use schema::{Field, FieldType, Schema};
pub use service::ConfigService;
pub use storage_key::{KeyPaths, StorageKey, DEFAULT_PREFIX};
