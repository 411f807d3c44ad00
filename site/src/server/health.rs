//! Readiness and metrics endpoints.
//!
//! Liveness (`/health`) comes from `symposium_web::handlers`.

use super::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,
    /// Database file readable and well formed
    pub store: bool,
}

/// Readiness check endpoint.
///
/// Returns 200 when the database file can be loaded (a missing file counts,
/// it loads as empty) and 503 otherwise.
///
/// ```bash
/// curl http://localhost:8080/ready
/// # {"ready":true,"store":true}
/// ```
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let store = match state.store.load().await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            false
        }
    };

    let status = if store {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(ReadinessResponse { ready: store, store }))
}

/// Prometheus scrape endpoint.
#[allow(clippy::unused_async)]
pub async fn metrics_endpoint(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}
