//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::time::Duration;
use taskhub_core::{Interface, TaskhubResult};
use tracing::{debug, warn};

/// Cache interface for storing and retrieving cached data.
///
/// Values are JSON strings so the trait stays dyn-compatible.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> TaskhubResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> TaskhubResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> TaskhubResult<bool>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Typed helpers layered over [`CacheInterface`].
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    ///
    /// An empty or undecodable entry is reported as a miss. Errors from the
    /// cache itself are returned.
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> TaskhubResult<Option<T>> {
        let Some(json) = self.get_raw(key).await? else {
            return Ok(None);
        };
        if json.is_empty() {
            debug!("Empty cache entry for key '{}'", key);
            return Ok(None);
        }

        match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Discarding undecodable cache entry '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) -> TaskhubResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }

    /// Returns the cached value under `key`, or loads it and caches it.
    ///
    /// Loader errors are returned untouched. Writing the loaded value back is
    /// best-effort: a failed write is logged and the value is still returned.
    async fn read_through<T, F, Fut>(&self, key: &str, ttl: Duration, loader: F) -> TaskhubResult<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = TaskhubResult<T>> + Send,
    {
        if let Some(cached) = self.get::<T>(key).await? {
            debug!("Serving '{}' from cache", key);
            return Ok(cached);
        }

        let value = loader().await?;

        if let Err(e) = self.set(key, &value, ttl).await {
            warn!("Failed to populate cache key '{}': {}", key, e);
        }

        Ok(value)
    }

    /// Drops `key`, logging instead of failing.
    async fn invalidate(&self, key: &str) {
        match self.delete(key).await {
            Ok(deleted) => debug!("Invalidated cache key '{}' (existed: {})", key, deleted),
            Err(e) => warn!("Failed to invalidate cache key '{}': {}", key, e),
        }
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
