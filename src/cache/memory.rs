//! In-process cache store backed by moka.
//!
//! Each entry carries its own expiry, computed from the TTL passed to
//! [`CacheStore::set`]. moka reclaims expired entries eagerly during its
//! housekeeping; [`MemoryStore::get`] additionally checks the deadline so an
//! expired entry is never returned between housekeeping runs.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use super::{CacheStore, DEFAULT_MAX_ENTRIES, MAX_TTL};
use crate::error::CacheError;
use crate::key::CacheKey;

#[derive(Clone, Debug)]
struct CacheEntry {
    value: String,
    ttl: Duration,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Expiry policy: every write (create or overwrite) restarts the entry's
/// TTL; reads leave it untouched.
struct PerEntryTtl;

impl Expiry<String, CacheEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Bounded in-memory [`CacheStore`].
///
/// Entries beyond `max_entries` are evicted by moka's TinyLFU policy.
/// Cheap to share: clone the store or wrap it in an `Arc`.
#[derive(Clone)]
pub struct MemoryStore {
    entries: Cache<String, CacheEntry>,
}

impl MemoryStore {
    /// Create an empty store with the default max capacity (10,000).
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    /// Create a store with a custom max capacity.
    pub fn with_max_entries(max: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max)
            .expire_after(PerEntryTtl)
            .build();
        Self { entries }
    }

    /// Number of entries currently held (approximate until pending
    /// housekeeping has run).
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict all entries.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &CacheKey) -> Result<String, CacheError> {
        match self.entries.get(key.as_str()).await {
            Some(entry) if !entry.is_expired(Instant::now()) => Ok(entry.value),
            Some(_) => {
                self.entries.invalidate(key.as_str()).await;
                Err(CacheError::NotFound)
            }
            None => Err(CacheError::NotFound),
        }
    }

    async fn set(&self, key: &CacheKey, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let ttl = ttl.min(MAX_TTL);
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| CacheError::StoreUnavailable(format!("TTL {ttl:?} out of range")))?;
        let entry = CacheEntry {
            value: value.to_owned(),
            ttl,
            expires_at,
        };
        self.entries.insert(key.as_str().to_owned(), entry).await;
        Ok(())
    }
}
