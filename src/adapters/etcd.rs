// SPDX-License-Identifier: MIT OR Apache-2.0

//! etcd storage adapter.
//!
//! This module provides a [`Storage`] implementation backed by an etcd v3 cluster.

use crate::adapters::runtime::block_on;
use crate::domain::{ConfigError, Result, StorageKey};
use crate::ports::Storage;
use etcd_client::{Client, ConnectOptions};
use std::fmt;
use std::time::Duration;

/// Default time allowed for establishing a connection to etcd.
pub const DIAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Storage adapter for etcd.
///
/// Every `get` and `put` is a single round trip to the cluster; nothing is
/// cached locally.
///
/// # Examples
///
/// ```rust,no_run
/// use rigel::adapters::EtcdStorage;
/// use rigel::ports::Storage;
///
/// # fn main() -> rigel::domain::Result<()> {
/// let storage = EtcdStorage::connect(vec!["localhost:2379"])?;
/// let value = storage.get_str("/remiges/rigel/conf/app/1/port")?;
/// # Ok(())
/// # }
/// ```
pub struct EtcdStorage {
    /// etcd client, cloned per request
    client: Client,
    /// Endpoints the client was connected to
    endpoints: Vec<String>,
}

impl EtcdStorage {
    /// Connects to etcd with the default dial timeout.
    ///
    /// # Arguments
    ///
    /// * `endpoints` - List of etcd endpoints (e.g., `["localhost:2379"]`)
    pub fn connect<S: AsRef<str>>(endpoints: Vec<S>) -> Result<Self> {
        Self::connect_with_options(
            endpoints,
            ConnectOptions::new().with_connect_timeout(DIAL_TIMEOUT),
        )
    }

    /// Connects to etcd with caller-supplied connection options, overriding the
    /// defaults entirely.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use etcd_client::ConnectOptions;
    /// use rigel::adapters::EtcdStorage;
    /// use std::time::Duration;
    ///
    /// # fn main() -> rigel::domain::Result<()> {
    /// let options = ConnectOptions::new()
    ///     .with_connect_timeout(Duration::from_secs(2))
    ///     .with_timeout(Duration::from_secs(1));
    /// let storage = EtcdStorage::connect_with_options(vec!["etcd-0:2379"], options)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn connect_with_options<S: AsRef<str>>(
        endpoints: Vec<S>,
        options: ConnectOptions,
    ) -> Result<Self> {
        let endpoints: Vec<String> = endpoints.iter().map(|s| s.as_ref().to_string()).collect();
        if endpoints.is_empty() {
            return Err(ConfigError::StorageError {
                backend: "etcd".to_string(),
                message: "No etcd endpoints given".to_string(),
                source: None,
            });
        }

        let connect_to = endpoints.clone();
        let client = block_on("etcd", async move {
            Client::connect(connect_to, Some(options)).await
        })?
        .map_err(|e| ConfigError::StorageError {
            backend: "etcd".to_string(),
            message: format!("Failed to create etcd client: {}", e),
            source: Some(Box::new(e)),
        })?;

        tracing::debug!("Connected to etcd at {:?}", endpoints);
        Ok(Self { client, endpoints })
    }

    /// Returns the endpoints this adapter was connected to.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }
}

impl fmt::Debug for EtcdStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EtcdStorage")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl Storage for EtcdStorage {
    fn name(&self) -> &str {
        "etcd"
    }

    fn get(&self, key: &StorageKey) -> Result<String> {
        let mut client = self.client.clone();
        let request_key = key.to_string();
        let response = block_on("etcd", async move { client.get(request_key, None).await })?
            .map_err(|e| ConfigError::StorageError {
                backend: "etcd".to_string(),
                message: format!("Failed to get key '{}' from etcd: {}", key, e),
                source: Some(Box::new(e)),
            })?;

        let kv = response
            .kvs()
            .first()
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_string(),
            })?;

        String::from_utf8(kv.value().to_vec()).map_err(|e| ConfigError::DecodeError {
            key: key.to_string(),
            message: "Value is not valid UTF-8".to_string(),
            source: Some(Box::new(e)),
        })
    }

    fn put(&self, key: &StorageKey, value: &str) -> Result<()> {
        let mut client = self.client.clone();
        let request_key = key.to_string();
        let request_value = value.to_string();
        block_on("etcd", async move {
            client.put(request_key, request_value, None).await
        })?
        .map_err(|e| ConfigError::StorageError {
            backend: "etcd".to_string(),
            message: format!("Failed to put key '{}' to etcd: {}", key, e),
            source: Some(Box::new(e)),
        })?;
        Ok(())
    }
}
