//! Huginn - content-addressed prompt cache for AI backends
//!
//! Huginn answers prompts by delegating to an AI backend and remembers the
//! answers in a cache keyed by a SHA-256 digest of the prompt. Identical
//! prompts within the TTL are answered from the cache without touching the
//! backend.
//!
//! The cache is strictly an optimization: if the store is unreachable the
//! resolver still answers from the backend, and if writing the answer back
//! fails the answer is still returned.
//!
//! # Example
//!
//! ```rust,no_run
//! use huginn::Huginn;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> huginn::Result<()> {
//!     let resolver = Huginn::builder()
//!         .backend_url("http://127.0.0.1:8000")
//!         .memory_cache(10_000)
//!         .ttl(Duration::from_secs(60))
//!         .build()?;
//!
//!     let first = resolver.resolve("2+2").await?;
//!     assert!(!first.served_from_cache);
//!
//!     let second = resolver.resolve("2+2").await?;
//!     assert!(second.served_from_cache);
//!     println!("{}", second.answer);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `redis` (default): [`cache::RedisStore`].
//! - `server`: the `huginnd` HTTP daemon and its configuration loader.

pub mod backend;
mod builder;
pub mod cache;
pub mod error;
pub mod key;
mod resolver;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
mod version;

pub use backend::{AiBackend, HttpBackend};
pub use builder::{Huginn, HuginnBuilder};
pub use cache::{CacheStore, MAX_TTL, MemoryStore, NoopStore};
pub use error::{BackendError, CacheError, HuginnError, Result};
pub use key::CacheKey;
pub use resolver::{DEFAULT_TTL, PromptResolver, Resolution, ResolverConfig};
pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, git_dirty, version_string};
