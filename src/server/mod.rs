//! HTTP server for huginnd.
//!
//! This module provides:
//! - The axum router and handlers (`routes`)
//! - Wire types for requests, responses and error envelopes (`convert`)
//! - Configuration types (`config`)
//!
//! # Endpoints
//!
//! - `POST /ask`: `{"prompt": "..."}` → `{"prompt", "result", "cached"}`
//! - `GET /health`: `{"status": "ok", "version": "..."}`
//!
//! Every error response carries `{"errors": ["<message>"]}`.

pub mod config;
pub mod convert;
mod routes;

pub use routes::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{HuginnError, PromptResolver, Result};
use config::Config;

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/ask",
            post(routes::ask).fallback(routes::method_not_allowed),
        )
        .route(
            "/health",
            get(routes::health).fallback(routes::method_not_allowed),
        )
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Validate the limits, bind `config.server.address` and serve until the
/// process is stopped.
pub async fn serve(config: &Config, resolver: Arc<PromptResolver>) -> Result<()> {
    config.validate()?;
    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| HuginnError::Configuration(format!("Invalid address: {e}")))?;

    let state = AppState::new(
        resolver,
        config.request_timeout(),
        config.server.limits.max_concurrent_requests,
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HuginnError::Server(format!("Failed to bind {addr}: {e}")))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| HuginnError::Server(e.to_string()))
}
