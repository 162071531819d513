//! HTTP client for the `/ask` backend protocol.
//!
//! Request: `POST {base_url}/ask` with `{"prompt": "<text>"}`.
//! Response: any 2xx with a JSON object carrying a string `"result"` field.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::AiBackend;
use crate::error::BackendError;

/// Default base URL for the AI backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default client-level timeout for a single `/ask` call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest error body echoed back in [`BackendError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// [`AiBackend`] reached over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client for `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a backend client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AiBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn ask(&self, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/ask", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&AskRequest { prompt })
            .send()
            .await
            .map_err(|e| BackendError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::Http(e.to_string()))?;
        let parsed: AskResponse =
            serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(parsed.result)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct AskRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    result: String,
}
