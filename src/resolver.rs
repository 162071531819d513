//! Prompt resolution: cache lookup, backend call, write-through.
//!
//! # Fail-open cache
//!
//! The cache is an optimization, never a dependency. A store error on read
//! is handled exactly like a miss, and a store error on write is logged and
//! dropped: a backend answer is returned to the caller whether or not it
//! could be cached. Only backend failures fail a resolution.
//!
//! # Concurrency
//!
//! [`PromptResolver`] holds no mutable state and is shared across request
//! tasks behind an `Arc`. Two concurrent resolutions of the same prompt may
//! both miss and both call the backend; each writes the same key and the
//! store keeps the last write. There is no in-flight deduplication.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::backend::AiBackend;
use crate::cache::CacheStore;
use crate::error::CacheError;
use crate::key::{CacheKey, DEFAULT_NAMESPACE};
use crate::telemetry;
use crate::{HuginnError, Result};

/// Default time-to-live for cached answers.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Resolver settings.
///
/// ```rust
/// # use huginn::ResolverConfig;
/// # use std::time::Duration;
/// let config = ResolverConfig::new()
///     .namespace("answers:")
///     .ttl(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Prefix for every cache key. Default: `"ai:"`.
    pub namespace: String,
    /// Time-to-live for cached answers. Default: 60 seconds.
    pub ttl: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            ttl: DEFAULT_TTL,
        }
    }
}

impl ResolverConfig {
    /// Create a new config with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache key namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the time-to-live for cached answers.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub prompt: String,
    pub answer: String,
    /// `true` when `answer` came from the cache and no backend call was made.
    pub served_from_cache: bool,
}

/// Answers prompts through a cache in front of an [`AiBackend`].
pub struct PromptResolver {
    store: Arc<dyn CacheStore>,
    backend: Arc<dyn AiBackend>,
    config: ResolverConfig,
}

impl PromptResolver {
    pub fn new(
        store: Arc<dyn CacheStore>,
        backend: Arc<dyn AiBackend>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            store,
            backend,
            config,
        }
    }

    /// Cache key this resolver uses for `prompt`.
    pub fn cache_key(&self, prompt: &str) -> CacheKey {
        CacheKey::derive(&self.config.namespace, prompt)
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Resolve `prompt`, serving from cache when possible.
    ///
    /// # Errors
    ///
    /// - [`HuginnError::InvalidPrompt`] for empty or whitespace-only prompts
    ///   (no cache or backend access happens).
    /// - [`HuginnError::Backend`] when the cache missed and the backend call
    ///   failed. Nothing is written to the cache in that case.
    #[instrument(skip_all, fields(store = self.store.name(), backend = self.backend.name()))]
    pub async fn resolve(&self, prompt: &str) -> Result<Resolution> {
        if prompt.trim().is_empty() {
            return Err(HuginnError::InvalidPrompt);
        }

        let key = self.cache_key(prompt);

        if let Some(answer) = self.lookup(&key).await {
            metrics::counter!(telemetry::RESOLUTIONS_TOTAL, "status" => "ok").increment(1);
            return Ok(Resolution {
                prompt: prompt.to_owned(),
                answer,
                served_from_cache: true,
            });
        }

        let answer = match self.ask_backend(prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                metrics::counter!(telemetry::RESOLUTIONS_TOTAL, "status" => "error").increment(1);
                return Err(e);
            }
        };

        self.store_answer(&key, &answer).await;

        metrics::counter!(telemetry::RESOLUTIONS_TOTAL, "status" => "ok").increment(1);
        Ok(Resolution {
            prompt: prompt.to_owned(),
            answer,
            served_from_cache: false,
        })
    }

    /// Cache read; every failure is a miss.
    async fn lookup(&self, key: &CacheKey) -> Option<String> {
        let store = self.store.name().to_owned();
        match self.store.get(key).await {
            Ok(value) => {
                debug!(%key, "cache hit");
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "store" => store).increment(1);
                Some(value)
            }
            Err(CacheError::NotFound) => {
                debug!(%key, "cache miss");
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "store" => store).increment(1);
                None
            }
            Err(e) => {
                warn!(%key, error = %e, "cache read failed, treating as miss");
                metrics::counter!(telemetry::CACHE_ERRORS_TOTAL,
                    "store" => store.clone(),
                    "operation" => "get",
                )
                .increment(1);
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "store" => store).increment(1);
                None
            }
        }
    }

    async fn ask_backend(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();
        let result = self.backend.ask(prompt).await;
        metrics::histogram!(telemetry::BACKEND_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());

        match result {
            Ok(answer) => {
                metrics::counter!(telemetry::BACKEND_REQUESTS_TOTAL, "status" => "ok")
                    .increment(1);
                Ok(answer)
            }
            Err(e) => {
                warn!(error = %e, "backend call failed");
                metrics::counter!(telemetry::BACKEND_REQUESTS_TOTAL, "status" => "error")
                    .increment(1);
                Err(e.into())
            }
        }
    }

    /// Cache write; failures are logged and dropped.
    async fn store_answer(&self, key: &CacheKey, answer: &str) {
        if let Err(e) = self.store.set(key, answer, self.config.ttl).await {
            warn!(%key, error = %e, "cache write failed, answer not cached");
            metrics::counter!(telemetry::CACHE_ERRORS_TOTAL,
                "store" => self.store.name().to_owned(),
                "operation" => "set",
            )
            .increment(1);
        }
    }
}
