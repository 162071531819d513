//! Telemetry metric name constants.
//!
//! Centralised metric names for huginn operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `huginn_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `status`: outcome, "ok" or "error"
//! - `operation`: cache operation, "get" or "set"
//! - `store`: cache store name (e.g. "redis", "memory")

/// Total `resolve` calls that reached the cache (blank prompts excluded).
///
/// Labels: `status` ("ok" | "error").
pub const RESOLUTIONS_TOTAL: &str = "huginn_resolutions_total";

/// Total cache hits.
///
/// Labels: `store`.
pub const CACHE_HITS_TOTAL: &str = "huginn_cache_hits_total";

/// Total cache misses, including misses caused by store errors.
///
/// Labels: `store`.
pub const CACHE_MISSES_TOTAL: &str = "huginn_cache_misses_total";

/// Total cache store failures absorbed by the resolver.
///
/// Labels: `store`, `operation` ("get" | "set").
pub const CACHE_ERRORS_TOTAL: &str = "huginn_cache_errors_total";

/// Total backend calls.
///
/// Labels: `status` ("ok" | "error").
pub const BACKEND_REQUESTS_TOTAL: &str = "huginn_backend_requests_total";

/// Backend call duration in seconds.
pub const BACKEND_DURATION_SECONDS: &str = "huginn_backend_duration_seconds";
