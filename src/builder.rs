//! Builder for configuring resolver instances

use std::sync::Arc;
use std::time::Duration;

use crate::backend::{AiBackend, DEFAULT_TIMEOUT, HttpBackend};
use crate::cache::{CacheStore, MAX_TTL, MemoryStore, NoopStore};
use crate::resolver::{PromptResolver, ResolverConfig};
use crate::{HuginnError, Result};

/// Main entry point for creating resolver instances.
pub struct Huginn;

impl Huginn {
    /// Create a new builder for configuring the resolver.
    pub fn builder() -> HuginnBuilder {
        HuginnBuilder::new()
    }
}

enum StoreChoice {
    None,
    Memory { max_entries: u64 },
    #[cfg(feature = "redis")]
    Redis(String),
    Custom(Arc<dyn CacheStore>),
}

enum BackendChoice {
    Unset,
    Http(String),
    Custom(Arc<dyn AiBackend>),
}

/// Builder for configuring resolver instances.
///
/// A backend is mandatory. Without a cache choice the resolver uses
/// [`NoopStore`] (every call goes to the backend).
///
/// ```rust,no_run
/// # use huginn::Huginn;
/// # use std::time::Duration;
/// # fn main() -> huginn::Result<()> {
/// let resolver = Huginn::builder()
///     .backend_url("http://ai-server:8000")
///     .memory_cache(10_000)
///     .ttl(Duration::from_secs(60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct HuginnBuilder {
    backend: BackendChoice,
    backend_timeout: Duration,
    store: StoreChoice,
    config: ResolverConfig,
}

impl HuginnBuilder {
    pub fn new() -> Self {
        Self {
            backend: BackendChoice::Unset,
            backend_timeout: DEFAULT_TIMEOUT,
            store: StoreChoice::None,
            config: ResolverConfig::default(),
        }
    }

    /// Use the HTTP `/ask` backend at `base_url`.
    pub fn backend_url(mut self, base_url: impl Into<String>) -> Self {
        self.backend = BackendChoice::Http(base_url.into());
        self
    }

    /// Timeout for HTTP backend calls (default 60 seconds). Ignored for
    /// custom backends.
    pub fn backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }

    /// Use a caller-supplied backend.
    pub fn backend(mut self, backend: Arc<dyn AiBackend>) -> Self {
        self.backend = BackendChoice::Custom(backend);
        self
    }

    /// Cache answers in Redis at `url`.
    #[cfg(feature = "redis")]
    pub fn redis(mut self, url: impl Into<String>) -> Self {
        self.store = StoreChoice::Redis(url.into());
        self
    }

    /// Cache answers in process memory, bounded to `max_entries`.
    pub fn memory_cache(mut self, max_entries: u64) -> Self {
        self.store = StoreChoice::Memory { max_entries };
        self
    }

    /// Disable caching.
    pub fn no_cache(mut self) -> Self {
        self.store = StoreChoice::None;
        self
    }

    /// Use a caller-supplied cache store.
    pub fn store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = StoreChoice::Custom(store);
        self
    }

    /// Set the cache key namespace (default `"ai:"`).
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Set the TTL of cached answers (default 60 seconds).
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.config.ttl = ttl;
        self
    }

    /// Build the resolver.
    pub fn build(self) -> Result<PromptResolver> {
        if self.config.ttl.is_zero() {
            return Err(HuginnError::Configuration(
                "cache TTL must be greater than zero".to_string(),
            ));
        }
        if self.config.ttl > MAX_TTL {
            return Err(HuginnError::Configuration(format!(
                "cache TTL {:?} exceeds the maximum of {:?}",
                self.config.ttl, MAX_TTL
            )));
        }

        let backend: Arc<dyn AiBackend> = match self.backend {
            BackendChoice::Unset => {
                return Err(HuginnError::Configuration(
                    "no backend configured".to_string(),
                ));
            }
            BackendChoice::Http(base_url) => {
                if base_url.trim().is_empty() {
                    return Err(HuginnError::Configuration(
                        "backend URL must not be empty".to_string(),
                    ));
                }
                Arc::new(HttpBackend::with_timeout(base_url, self.backend_timeout))
            }
            BackendChoice::Custom(backend) => backend,
        };

        let store: Arc<dyn CacheStore> = match self.store {
            StoreChoice::None => Arc::new(NoopStore),
            StoreChoice::Memory { max_entries } => {
                Arc::new(MemoryStore::with_max_entries(max_entries))
            }
            #[cfg(feature = "redis")]
            StoreChoice::Redis(url) => Arc::new(crate::cache::RedisStore::from_url(&url)?),
            StoreChoice::Custom(store) => store,
        };

        Ok(PromptResolver::new(store, backend, self.config))
    }
}

impl Default for HuginnBuilder {
    fn default() -> Self {
        Self::new()
    }
}
