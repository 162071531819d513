//! Content-addressed cache keys.

use std::fmt;

use sha2::{Digest, Sha256};

/// Namespace prefix applied to every key unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "ai:";

/// Cache key for a prompt: `namespace` followed by the lowercase hex
/// SHA-256 digest of the prompt bytes.
///
/// The digest is stable across processes, so keys written by one instance
/// are readable by every other instance sharing the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for `prompt` under `namespace`.
    pub fn derive(namespace: &str, prompt: &str) -> Self {
        let digest = Sha256::digest(prompt.as_bytes());
        Self(format!("{namespace}{digest:x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
