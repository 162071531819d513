use std::time::Duration;

use async_trait::async_trait;

use super::CacheStore;
use crate::error::CacheError;
use crate::key::CacheKey;

/// Store that never holds anything: every read misses, every write is
/// accepted and discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

#[async_trait]
impl CacheStore for NoopStore {
    fn name(&self) -> &str {
        "noop"
    }

    async fn get(&self, _key: &CacheKey) -> Result<String, CacheError> {
        Err(CacheError::NotFound)
    }

    async fn set(&self, _key: &CacheKey, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}
