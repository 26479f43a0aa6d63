// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The client core depends only on the [`Storage`] port. Concrete backends live in
//! the adapters layer.

pub mod storage;

pub use storage::Storage;
