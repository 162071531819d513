//! Wiremock integration tests for HttpBackend.
//!
//! These tests verify the `/ask` wire format and error mapping using mocked
//! responses.

use std::sync::Arc;
use std::time::Duration;

use huginn::{AiBackend, BackendError, HttpBackend, HuginnError, MemoryStore, PromptResolver};
use huginn::{Huginn, ResolverConfig};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test successful ask request.
#[tokio::test]
async fn test_ask_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "prompt": "2+2" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": "4" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let answer = backend.ask("2+2").await.expect("ask should succeed");
    assert_eq!(answer, "4");
}

/// Extra response fields are ignored.
#[tokio::test]
async fn test_ask_ignores_extra_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "AI response to: hi",
            "model": "sim-1"
        })))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(format!("{}/", mock_server.uri()));
    assert_eq!(backend.ask("hi").await.unwrap(), "AI response to: hi");
}

/// Test 500 returns Status error with body.
#[tokio::test]
async fn test_error_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let result = backend.ask("hello").await;

    match result {
        Err(BackendError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "model crashed");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

/// Long error bodies are truncated.
#[tokio::test]
async fn test_error_body_truncated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(503).set_body_string("x".repeat(10_000)))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    match backend.ask("hello").await {
        Err(BackendError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body.len(), 512);
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

/// Test 404 (wrong base URL) surfaces as Status.
#[tokio::test]
async fn test_error_404() {
    let mock_server = MockServer::start().await;

    let backend = HttpBackend::new(mock_server.uri());
    let result = backend.ask("hello").await;
    assert!(
        matches!(result, Err(BackendError::Status { status: 404, .. })),
        "expected 404, got {result:?}"
    );
}

/// Non-JSON body is a decode error.
#[tokio::test]
async fn test_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let result = backend.ask("hello").await;
    assert!(matches!(result, Err(BackendError::Decode(_))));
}

/// JSON without a `result` string is a decode error.
#[tokio::test]
async fn test_missing_result_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "answer": "4" })),
        )
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let result = backend.ask("hello").await;
    assert!(matches!(result, Err(BackendError::Decode(_))));
}

/// Connection refused is an HTTP error.
#[tokio::test]
async fn test_connection_refused() {
    let backend = HttpBackend::new("http://127.0.0.1:1");
    let result = backend.ask("hello").await;
    assert!(matches!(result, Err(BackendError::Http(_))));
}

/// Slow backend trips the client timeout.
#[tokio::test]
async fn test_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "result": "late" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::with_timeout(mock_server.uri(), Duration::from_millis(100));
    let result = backend.ask("hello").await;
    assert!(matches!(result, Err(BackendError::Http(_))));
}

// ============================================================================
// End-to-end through the resolver
// ============================================================================

/// Second resolve within the TTL is served from cache: exactly one HTTP call.
#[tokio::test]
async fn test_resolver_calls_backend_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": "4" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = Huginn::builder()
        .backend_url(mock_server.uri())
        .memory_cache(100)
        .build()
        .unwrap();

    let first = resolver.resolve("2+2").await.unwrap();
    let second = resolver.resolve("2+2").await.unwrap();
    assert!(!first.served_from_cache);
    assert!(second.served_from_cache);
    assert_eq!(second.answer, "4");
}

/// Backend failure surfaces through the resolver as HuginnError::Backend.
#[tokio::test]
async fn test_resolver_surfaces_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let resolver = PromptResolver::new(
        store.clone(),
        Arc::new(HttpBackend::new(mock_server.uri())),
        ResolverConfig::default(),
    );

    let result = resolver.resolve("2+2").await;
    assert!(matches!(
        result,
        Err(HuginnError::Backend(BackendError::Status { status: 502, .. }))
    ));
    assert!(store.is_empty());
}
