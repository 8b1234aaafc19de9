//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use taskhub_core::{TaskhubError, TaskhubResult};
use tracing::debug;

/// TTL for cached listings (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Upper bound on a single cache round-trip, including pool checkout.
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Redis-based cache service.
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
    op_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self {
            pool: Some(pool),
            op_timeout: OPERATION_TIMEOUT,
        }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            op_timeout: OPERATION_TIMEOUT,
        }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> TaskhubResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| TaskhubError::Cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(TaskhubError::Cache("Cache is disabled".to_string())),
        }
    }
}

/// Runs one cache operation under `limit`; an elapsed deadline is a cache error.
async fn bounded<T, F>(limit: Duration, op: &str, key: &str, fut: F) -> TaskhubResult<T>
where
    F: Future<Output = TaskhubResult<T>>,
{
    tokio::time::timeout(limit, fut).await.map_err(|_| {
        TaskhubError::Cache(format!("{} '{}' timed out after {}ms", op, key, limit.as_millis()))
    })?
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> TaskhubResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let value = bounded(self.op_timeout, "GET", key, async {
            let mut conn = self.get_conn().await?;
            conn.get::<_, Option<String>>(key)
                .await
                .map_err(|e| TaskhubError::Cache(format!("Failed to get key '{}': {}", key, e)))
        })
        .await?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> TaskhubResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let ttl_secs = ttl.as_secs().max(1);

        bounded(self.op_timeout, "SET", key, async {
            let mut conn = self.get_conn().await?;
            conn.set_ex::<_, _, ()>(key, value, ttl_secs)
                .await
                .map_err(|e| TaskhubError::Cache(format!("Failed to set key '{}': {}", key, e)))
        })
        .await?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> TaskhubResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let deleted: i64 = bounded(self.op_timeout, "DEL", key, async {
            let mut conn = self.get_conn().await?;
            conn.del(key)
                .await
                .map_err(|e| TaskhubError::Cache(format!("Failed to delete key '{}': {}", key, e)))
        })
        .await?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .field("op_timeout", &self.op_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_cache_is_a_no_op() {
        let cache = RedisCacheService::disabled();

        assert_eq!(cache.get_raw("k").await.unwrap(), None);
        cache.set_raw("k", "[]", DEFAULT_TTL).await.unwrap();
        assert!(!cache.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_bounded_times_out_as_cache_error() {
        let result: TaskhubResult<()> =
            bounded(Duration::from_millis(10), "GET", "k", std::future::pending()).await;

        match result {
            Err(TaskhubError::Cache(msg)) => assert!(msg.contains("timed out"), "{}", msg),
            other => panic!("Expected Cache error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bounded_passes_through_result() {
        let result = bounded(OPERATION_TIMEOUT, "GET", "k", async { Ok(3) }).await;
        assert_eq!(result.unwrap(), 3);
    }
}
