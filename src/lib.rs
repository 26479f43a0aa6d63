// SPDX-License-Identifier: MIT OR Apache-2.0

//! A schema-driven configuration client over a key-value store.
//!
//! Applications declare a named, versioned schema listing fields and their
//! types (`string`, `int`, `bool`). Values for each field live under
//! predictable keys in a shared store such as etcd or Redis. The client reads
//! the schema, fetches one value per field, coerces each to its declared type
//! and binds the result into an application struct.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Schema model, key layout, coercion and errors
//!   (`Schema`, `KeyPaths`, `ConfigValue`, `ConfigError`)
//! - **Ports**: The `Storage` trait through which all reads and writes flow
//! - **Adapters**: `Storage` implementations (in-memory, etcd, Redis)
//! - **Service**: The `Rigel` client that orchestrates everything
//!
//! # Key Layout
//!
//! With the default prefix `/remiges/rigel`:
//!
//! - schema fields: `/remiges/rigel/schema/<name>/<version>/fields`
//! - field values: `/remiges/rigel/conf/<name>/<version>/<field>`
//!
//! # Feature Flags
//!
//! - `yaml`: Read client settings from YAML files (default)
//! - `etcd`: Enable the etcd storage adapter
//! - `redis`: Enable the Redis storage adapter
//! - `remote`: Enable all remote adapters (etcd + redis)
//! - `cli`: Build the `rigelctl` command-line tool
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use rigel::adapters::MemoryStorage;
//! use rigel::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Config {
//!     database_url: String,
//!     max_retries: i64,
//!     enable_ssl: bool,
//! }
//!
//! # fn main() -> Result<()> {
//! let rigel = Rigel::new(MemoryStorage::new());
//! rigel.add_schema(
//!     "example",
//!     1,
//!     &[
//!         Field::new("database_url", "string"),
//!         Field::new("max_retries", "int"),
//!         Field::new("enable_ssl", "bool"),
//!     ],
//! )?;
//! rigel.set_config_value("example", 1, "database_url", "postgres://localhost/app")?;
//! rigel.set_config_value("example", 1, "max_retries", "5")?;
//! rigel.set_config_value("example", 1, "enable_ssl", "true")?;
//!
//! let config: Config = rigel.load_config("example", 1, "default")?;
//! assert_eq!(config.database_url, "postgres://localhost/app");
//! assert_eq!(config.max_retries, 5);
//! assert!(config.enable_ssl);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
#[cfg(feature = "cli")]
pub mod cli;
pub mod domain;
pub mod ports;
pub mod service;
pub mod settings;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigMap, ConfigService, ConfigValue, Field, FieldType, KeyPaths, Result,
        Schema, StorageKey,
    };
    pub use crate::ports::Storage;
    pub use crate::service::{Rigel, RigelBuilder};
    pub use crate::settings::{Backend, ClientSettings};

    #[cfg(feature = "etcd")]
    pub use crate::adapters::EtcdStorage;
    #[cfg(feature = "redis")]
    pub use crate::adapters::RedisStorage;
}
