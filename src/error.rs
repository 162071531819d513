//! Huginn error types

/// Errors surfaced by [`PromptResolver::resolve`](crate::PromptResolver::resolve)
/// and the builder.
///
/// Cache failures never appear here: the resolver absorbs every
/// [`CacheError`] and degrades to a backend call.
#[derive(Debug, thiserror::Error)]
pub enum HuginnError {
    #[error("invalid prompt: prompt must not be empty or blank")]
    InvalidPrompt,

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("configuration error: {0}")]
    Configuration(String),

    /// Listener bind or accept-loop failure in the daemon.
    #[error("server error: {0}")]
    Server(String),
}

impl HuginnError {
    /// Whether the caller caused this error (as opposed to an upstream failure).
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidPrompt)
    }
}

/// Failure of the AI backend call.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Transport failure: connection refused, timeout, TLS, ...
    #[error("HTTP error: {0}")]
    Http(String),

    /// Backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected `{"result": "..."}` object.
    #[error("malformed backend response: {0}")]
    Decode(String),
}

/// Cache store failures.
///
/// Both variants are recovered inside the resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// Key absent or expired.
    #[error("cache entry not found")]
    NotFound,

    #[error("cache store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Result type alias for Huginn operations
pub type Result<T> = std::result::Result<T, HuginnError>;
