// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redis storage adapter.
//!
//! This module provides a [`Storage`] implementation that keeps each storage key
//! as a plain Redis string key.

use crate::adapters::runtime::block_on;
use crate::domain::{ConfigError, Result, StorageKey};
use crate::ports::Storage;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};

/// Storage adapter for Redis.
///
/// Keys are used verbatim, so `/remiges/rigel/conf/app/1/port` is stored under
/// that exact Redis key. A single multiplexed connection is shared by all
/// requests.
///
/// # Examples
///
/// ```rust,no_run
/// use rigel::adapters::RedisStorage;
/// use rigel::ports::Storage;
///
/// # fn main() -> rigel::domain::Result<()> {
/// let storage = RedisStorage::connect("redis://localhost:6379")?;
/// let value = storage.get_str("/remiges/rigel/conf/app/1/port")?;
/// # Ok(())
/// # }
/// ```
pub struct RedisStorage {
    /// Multiplexed connection, cloned per request
    connection: MultiplexedConnection,
    /// Connection URL with credentials stripped
    url: String,
}

impl RedisStorage {
    /// Validates a URL and opens a multiplexed connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., `"redis://localhost:6379"`)
    pub fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| ConfigError::StorageError {
            backend: "redis".to_string(),
            message: format!("Failed to create Redis client: {}", e),
            source: Some(Box::new(e)),
        })?;

        let connection = block_on("redis", async move {
            client.get_multiplexed_async_connection().await
        })?
        .map_err(|e| ConfigError::StorageError {
            backend: "redis".to_string(),
            message: format!("Failed to connect to Redis: {}", e),
            source: Some(Box::new(e)),
        })?;

        let url = redact_url(url);
        tracing::debug!("Connected to Redis at {}", url);
        Ok(Self { connection, url })
    }

    /// Returns the connection URL without credentials.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Drops any `user:password@` part from a connection URL.
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}{}", &url[..scheme_end + 3], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}

impl std::fmt::Debug for RedisStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStorage")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl Storage for RedisStorage {
    fn name(&self) -> &str {
        "redis"
    }

    fn get(&self, key: &StorageKey) -> Result<String> {
        let mut conn = self.connection.clone();
        let request_key = key.to_string();
        let value = block_on("redis", async move {
            conn.get::<_, Option<String>>(request_key).await
        })?
        .map_err(|e| ConfigError::StorageError {
            backend: "redis".to_string(),
            message: format!("Failed to fetch key '{}' from Redis: {}", key, e),
            source: Some(Box::new(e)),
        })?;

        value.ok_or_else(|| ConfigError::KeyNotFound {
            key: key.to_string(),
        })
    }

    fn put(&self, key: &StorageKey, value: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let request_key = key.to_string();
        let request_value = value.to_string();
        block_on("redis", async move {
            conn.set::<_, _, ()>(request_key, request_value).await
        })?
        .map_err(|e| ConfigError::StorageError {
            backend: "redis".to_string(),
            message: format!("Failed to store key '{}' in Redis: {}", key, e),
            source: Some(Box::new(e)),
        })
    }
}
