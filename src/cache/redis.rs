//! Redis-backed cache store.
//!
//! Values are stored as plain strings under the full cache key; expiry is
//! delegated to Redis via `SET key value PX <ttl_ms>`, so an expired entry is
//! simply absent on the next `GET`.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

use super::{CacheStore, MAX_TTL};
use crate::error::{CacheError, HuginnError};
use crate::key::CacheKey;

/// Default Redis URL.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// [`CacheStore`] backed by a standalone Redis server.
///
/// Opening the store only validates the URL; the connection is established
/// per operation, so an unreachable server surfaces as
/// [`CacheError::StoreUnavailable`] on `get`/`set` rather than at startup.
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    /// Create a store from a Redis URL (e.g. `redis://cache:6379/0`).
    pub fn from_url(url: &str) -> crate::Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| HuginnError::Configuration(format!("invalid Redis URL {url:?}: {e}")))?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::StoreUnavailable(format!("Redis connection error: {e}")))
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    fn name(&self) -> &str {
        "redis"
    }

    async fn get(&self, key: &CacheKey) -> Result<String, CacheError> {
        let mut con = self.connection().await?;
        let raw: Option<String> = con
            .get(key.as_str())
            .await
            .map_err(|e| CacheError::StoreUnavailable(format!("Redis GET error: {e}")))?;
        raw.ok_or(CacheError::NotFound)
    }

    async fn set(&self, key: &CacheKey, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut con = self.connection().await?;
        // PX rejects 0; a sub-millisecond TTL still gets one millisecond.
        let ttl_ms = u64::try_from(ttl.min(MAX_TTL).as_millis())
            .unwrap_or(u64::MAX)
            .max(1);
        let _: () = redis::cmd("SET")
            .arg(key.as_str())
            .arg(value)
            .arg("PX")
            .arg(ttl_ms)
            .query_async(&mut con)
            .await
            .map_err(|e| CacheError::StoreUnavailable(format!("Redis SET error: {e}")))?;
        Ok(())
    }
}
