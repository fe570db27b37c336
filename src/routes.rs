//! Top-level router configuration.
//!
//! # Route Structure
//!
//! With `BASE_PATH` as `{base}` (empty by default):
//!
//! - `GET  {base}/`        - Create (`?targetUrl=`) or usage text
//! - `GET  {base}`         - Same as above, registered only when `{base}` is non-empty
//! - `GET  {base}/{code}`  - Resolve a code, or create if `?targetUrl=` is present
//! - `GET  /health`        - Store health check
//! - anything else         - Usage text
//!
//! # Middleware
//!
//! - **Timeout** - Whole-request upper bound, answered with `408`
//! - **Tracing** - Request span and response latency logging

use crate::api::handlers::{code_handler, health_handler, root_handler, usage_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `base_path` - mount prefix without trailing slash (`""` or e.g. `"/prod"`)
/// - `request_timeout` - upper bound for a whole request
pub fn app_router(state: AppState, base_path: &str, request_timeout: Duration) -> Router {
    let base = base_path.trim_end_matches('/');

    let mut router = Router::new()
        .route(&format!("{}/", base), get(root_handler))
        .route(&format!("{}/{{code}}", base), get(code_handler))
        .route("/health", get(health_handler));

    if !base.is_empty() {
        router = router.route(base, get(root_handler));
    }

    router
        .fallback(usage_handler)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(tracing::layer())
}
