//! Liveness endpoint.
//!
//! `GET /health` answers as long as the process is serving requests. It does
//! not look at any dependency; readiness checks belong to the service.

use axum::Json;
use serde::Serialize;
use std::future::{ready, Ready};

/// Liveness body
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Health {
    /// Always `"ok"`
    pub status: &'static str,
    /// Version reported by the running binary
    pub version: &'static str,
}

/// Simple health check handler (for basic liveness).
///
/// The binary passes its own `CARGO_PKG_VERSION`.
///
/// ```text
/// .route("/health", get(health_check(env!("CARGO_PKG_VERSION"))))
///
/// GET /health
/// { "status": "ok", "version": "0.1.0" }
/// ```
#[must_use]
pub fn health_check(
    version: &'static str,
) -> impl Fn() -> Ready<Json<Health>> + Clone + Send + Sync + 'static {
    move || {
        ready(Json(Health {
            status: "ok",
            version,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health_check() {
        let handler = health_check("9.9.9");
        let Json(body) = handler().await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, "9.9.9");
    }
}
