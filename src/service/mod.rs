// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration client.
//!
//! [`Rigel`] implements the [`ConfigService`](crate::domain::ConfigService)
//! trait on top of any [`Storage`](crate::ports::Storage) backend.

pub mod rigel;
pub mod schema_repository;

// Re-export commonly used types
pub use rigel::{Rigel, RigelBuilder};
pub use schema_repository::SchemaRepository;
