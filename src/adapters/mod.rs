// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing storage backend implementations.
//!
//! Each adapter implements the [`Storage`](crate::ports::Storage) port for one
//! backend. Network adapters are gated behind cargo features.

pub mod memory;

#[cfg(feature = "etcd")]
pub mod etcd;
#[cfg(feature = "redis")]
pub mod redis;

pub use memory::MemoryStorage;

#[cfg(feature = "etcd")]
pub use etcd::EtcdStorage;
#[cfg(feature = "redis")]
pub use redis::RedisStorage;

#[cfg(any(feature = "etcd", feature = "redis"))]
pub(crate) mod runtime {
    //! Shared tokio runtime used by the network adapters to present a blocking
    //! [`Storage`](crate::ports::Storage) interface.

    use crate::domain::{ConfigError, Result};
    use once_cell::sync::OnceCell;
    use std::future::Future;
    use tokio::runtime::{Builder, Handle, Runtime};

    static RUNTIME: OnceCell<Runtime> = OnceCell::new();

    fn shared(backend: &str) -> Result<&'static Runtime> {
        RUNTIME.get_or_try_init(|| {
            Builder::new_multi_thread()
                .enable_all()
                .thread_name("rigel-storage")
                .build()
                .map_err(|e| ConfigError::StorageError {
                    backend: backend.to_string(),
                    message: "Failed to create tokio runtime".to_string(),
                    source: Some(Box::new(e)),
                })
        })
    }

    /// Drives `future` to completion on the shared runtime.
    ///
    /// Blocking on a runtime from inside another runtime panics, so callers that
    /// are already async get the future driven from a scoped helper thread.
    pub(crate) fn block_on<F>(backend: &str, future: F) -> Result<F::Output>
    where
        F: Future + Send,
        F::Output: Send,
    {
        let runtime = shared(backend)?;
        if Handle::try_current().is_err() {
            return Ok(runtime.block_on(future));
        }

        std::thread::scope(|scope| scope.spawn(|| runtime.block_on(future)).join()).map_err(|_| {
            ConfigError::StorageError {
                backend: backend.to_string(),
                message: "Storage worker thread panicked".to_string(),
                source: None,
            }
        })
    }
}
