//! AI backend collaborators.
//!
//! The resolver only needs `ask(prompt) -> answer`. [`HttpBackend`] speaks
//! the JSON `/ask` protocol; tests and embedders can supply their own
//! [`AiBackend`] implementation.

mod http;

pub use http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpBackend};

use async_trait::async_trait;

use crate::error::BackendError;

/// Something that can answer a prompt.
///
/// Implementations must not retry internally on behalf of the resolver;
/// one `ask` is one upstream attempt.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Backend name for logging/debugging.
    fn name(&self) -> &str;

    /// Answer `prompt`.
    async fn ask(&self, prompt: &str) -> Result<String, BackendError>;
}
