//! Configuration loading for huginnd.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag; must exist)
//! 2. `~/.huginn/config.toml` (user)
//! 3. `/etc/huginn/config.toml` (system)
//!
//! When no file is found the built-in defaults are used. Afterwards the
//! environment variables `HUGINN_BACKEND_URL` and `HUGINN_REDIS_URL`
//! override `backend.base_url` and `cache.url`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::backend::DEFAULT_BASE_URL;
use crate::cache::DEFAULT_MAX_ENTRIES;
use crate::key::DEFAULT_NAMESPACE;
use crate::{Huginn, HuginnBuilder, HuginnError, Result};

/// Environment override for `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "HUGINN_BACKEND_URL";
/// Environment override for `cache.url`.
pub const REDIS_URL_ENV: &str = "HUGINN_REDIS_URL";

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub cache: CacheSection,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8080).
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            limits: LimitsConfig::default(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:8080".to_string()
}

/// Resource limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum concurrent `/ask` requests (default: 100).
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
    /// Request deadline in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_max_concurrent(),
            request_timeout_secs: default_timeout(),
        }
    }
}

fn default_max_concurrent() -> usize {
    100
}

fn default_timeout() -> u64 {
    30
}

/// AI backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Backend base URL; `/ask` is appended (default: http://127.0.0.1:8000).
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    /// Per-call timeout in seconds (default: 60).
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

fn default_backend_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_backend_timeout() -> u64 {
    60
}

/// Which cache store to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    #[default]
    Redis,
    Memory,
    None,
}

/// Cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    #[serde(default)]
    pub kind: CacheKind,
    /// Redis URL, used when `kind = "redis"` (default: redis://127.0.0.1:6379).
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix (default: "ai:").
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Entry TTL in seconds (default: 60).
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
    /// Capacity of the memory store, used when `kind = "memory"` (default: 10000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            kind: CacheKind::default(),
            url: default_redis_url(),
            namespace: default_namespace(),
            ttl_secs: default_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_ttl() -> u64 {
    60
}

fn default_max_entries() -> u64 {
    DEFAULT_MAX_ENTRIES
}

impl Config {
    /// Load configuration from the standard locations, then apply
    /// environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path)?,
            None => Config::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every request fail or the
    /// concurrency cap impossible to allocate.
    pub fn validate(&self) -> Result<()> {
        let limits = &self.server.limits;
        if limits.max_concurrent_requests == 0 {
            return Err(HuginnError::Configuration(
                "server.limits.max_concurrent_requests must be greater than zero".to_string(),
            ));
        }
        if limits.max_concurrent_requests > Semaphore::MAX_PERMITS {
            return Err(HuginnError::Configuration(format!(
                "server.limits.max_concurrent_requests must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        if limits.request_timeout_secs == 0 {
            return Err(HuginnError::Configuration(
                "server.limits.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HuginnError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            HuginnError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path. `Ok(None)` means use defaults.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(HuginnError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".huginn").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/huginn/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|v| !v.is_empty()) {
            self.backend.base_url = url;
        }
        if let Some(url) = lookup(REDIS_URL_ENV).filter(|v| !v.is_empty()) {
            self.cache.url = url;
        }
    }

    /// Request deadline for `/ask`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.limits.request_timeout_secs)
    }

    /// Translate this configuration into a resolver builder.
    pub fn resolver_builder(&self) -> Result<HuginnBuilder> {
        let builder = Huginn::builder()
            .backend_url(&self.backend.base_url)
            .backend_timeout(Duration::from_secs(self.backend.timeout_secs))
            .namespace(&self.cache.namespace)
            .ttl(Duration::from_secs(self.cache.ttl_secs));

        let builder = match self.cache.kind {
            CacheKind::None => builder.no_cache(),
            CacheKind::Memory => builder.memory_cache(self.cache.max_entries),
            #[cfg(feature = "redis")]
            CacheKind::Redis => builder.redis(&self.cache.url),
            #[cfg(not(feature = "redis"))]
            CacheKind::Redis => {
                return Err(HuginnError::Configuration(
                    "cache.kind = \"redis\" requires the `redis` feature".to_string(),
                ));
            }
        };
        Ok(builder)
    }
}
