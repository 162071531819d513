//! Request handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tokio::sync::Semaphore;
use tracing::warn;

use super::convert::{AskRequest, AskResponse, ErrorEnvelope};
use crate::{HuginnError, PromptResolver};

/// Shared state for all handlers.
pub struct AppState {
    pub resolver: Arc<PromptResolver>,
    /// Deadline for a single `/ask` request.
    pub request_timeout: Duration,
    /// Caps in-flight `/ask` requests; a request that finds no permit is
    /// answered with 503 immediately.
    pub permits: Arc<Semaphore>,
}

impl AppState {
    pub fn new(
        resolver: Arc<PromptResolver>,
        request_timeout: Duration,
        max_concurrent_requests: usize,
    ) -> Self {
        Self {
            resolver,
            request_timeout,
            permits: Arc::new(Semaphore::new(max_concurrent_requests)),
        }
    }
}

/// Error response carrying an [`ErrorEnvelope`] body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<HuginnError> for ApiError {
    fn from(e: HuginnError) -> Self {
        let status = if e.is_user_error() {
            StatusCode::BAD_REQUEST
        } else {
            match e {
                HuginnError::Backend(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorEnvelope::single(self.message))).into_response()
    }
}

/// POST /ask: resolve a prompt.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;

    let _permit = state.permits.try_acquire().map_err(|_| {
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "too many concurrent requests",
        )
    })?;

    let resolution = tokio::time::timeout(
        state.request_timeout,
        state.resolver.resolve(&request.prompt),
    )
    .await
    .map_err(|_| {
        warn!(
            timeout_ms = state.request_timeout.as_millis() as u64,
            "request deadline exceeded"
        );
        ApiError::new(StatusCode::GATEWAY_TIMEOUT, "request timed out")
    })??;

    Ok(Json(resolution.into()))
}

/// GET /health: liveness and build version.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": crate::version_string(),
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not found")
}

/// Fallback for known routes hit with the wrong method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}
