//! Correlation ID middleware.
//!
//! Every request gets an id, read from `X-Correlation-ID` when the caller
//! sends a valid UUID and generated otherwise. The id is stored in the
//! request extensions as [`CorrelationId`], wraps the handler in an
//! `http_request` span and is echoed back on the response.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/api/events", get(list_events))
//!     .layer(correlation_id_layer());
//! ```

use axum::{extract::Request, http::HeaderValue, response::Response};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

use crate::extractors::CorrelationId;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Layer that assigns a correlation ID to every request.
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// Layer for correlation ID tracking.
#[derive(Clone, Copy, Debug, Default)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdService { inner }
    }
}

/// Service produced by [`CorrelationIdLayer`].
#[derive(Clone, Debug)]
pub struct CorrelationIdService<S> {
    inner: S,
}

impl<S> Service<Request> for CorrelationIdService<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        req.extensions_mut().insert(CorrelationId(id));

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %id,
            method = %req.method(),
            path = %req.uri().path(),
        );

        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.instrument(span).await?;

            if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
                response.headers_mut().insert(CORRELATION_ID_HEADER, value);
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code
mod tests {
    use super::*;
    use axum::{
        Router,
        http::{HeaderName, HeaderValue},
        routing::get,
    };
    use axum_test::TestServer;

    fn header_name() -> HeaderName {
        HeaderName::from_static(CORRELATION_ID_HEADER)
    }

    fn app() -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route(
                "/whoami",
                get(|CorrelationId(id): CorrelationId| async move { id.to_string() }),
            )
            .layer(correlation_id_layer())
    }

    #[tokio::test]
    async fn test_id_generated_when_missing() {
        let server = TestServer::new(app()).unwrap();

        let response = server.get("/ping").await;

        let header = response.header(CORRELATION_ID_HEADER);
        assert!(Uuid::parse_str(header.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_id_echoed_from_request() {
        let server = TestServer::new(app()).unwrap();
        let id = Uuid::new_v4();

        let response = server
            .get("/ping")
            .add_header(header_name(), HeaderValue::from_str(&id.to_string()).unwrap())
            .await;

        assert_eq!(response.header(CORRELATION_ID_HEADER), id.to_string().as_str());
    }

    #[tokio::test]
    async fn test_handler_sees_same_id_as_response() {
        let server = TestServer::new(app()).unwrap();

        let response = server
            .get("/whoami")
            .add_header(header_name(), HeaderValue::from_static("not-a-uuid"))
            .await;

        let header = response.header(CORRELATION_ID_HEADER);
        let header = header.to_str().unwrap();
        assert_ne!(header, "not-a-uuid");
        assert_eq!(response.text(), header);
    }
}
