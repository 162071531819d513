//! Cache stores.
//!
//! The resolver talks to its cache only through the [`CacheStore`] trait.
//! Three implementations are provided:
//!
//! - [`RedisStore`]: network-backed store shared by every instance pointing
//!   at the same Redis. Enabled by the `redis` feature (on by default).
//!
//! - [`MemoryStore`]: in-process moka cache with per-entry TTL. Useful for
//!   single-instance deployments and tests.
//!
//! - [`NoopStore`]: always misses, never stores. Disables caching without
//!   changing the resolver.
//!
//! # Failure semantics
//!
//! A store may fail in two ways, both reported as [`CacheError`]:
//! `NotFound` for absent or expired keys and `StoreUnavailable` when the
//! backing store cannot be reached. Callers treat both as a cache miss on
//! read and ignore them on write; see
//! [`PromptResolver`](crate::PromptResolver).
//!
//! Concurrent `set` calls for the same key are last-write-wins, ordered by
//! the store's own write serialization. Reads never extend an entry's TTL.

mod memory;
mod noop;
#[cfg(feature = "redis")]
mod redis;

pub use memory::MemoryStore;
pub use noop::NoopStore;
#[cfg(feature = "redis")]
pub use self::redis::{DEFAULT_REDIS_URL, RedisStore};

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;
use crate::key::CacheKey;

/// Default maximum number of entries held by a [`MemoryStore`].
pub const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Longest TTL a store will honour (one year). Stores clamp longer TTLs to
/// this value; the builder rejects them outright.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Key/value store with expiring entries.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Store name for logging and metric labels.
    fn name(&self) -> &str;

    /// Fetch the value stored under `key`.
    ///
    /// Returns [`CacheError::NotFound`] when the key is absent or expired.
    async fn get(&self, key: &CacheKey) -> Result<String, CacheError>;

    /// Store `value` under `key`, expiring after `ttl` (at most [`MAX_TTL`]).
    /// Overwrites any existing entry and resets its expiry.
    async fn set(&self, key: &CacheKey, value: &str, ttl: Duration) -> Result<(), CacheError>;
}
