//! Custom Axum extractors.
//!
//! - `CorrelationId`: the id assigned by [`correlation_id_layer`](crate::middleware::correlation_id_layer)
//! - `BearerToken`: the token of an `Authorization: Bearer <token>` header
//! - `JsonBody`: a JSON request body whose rejections are [`AppError`] JSON

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;

/// Correlation ID for request tracing.
///
/// Taken from the request extensions when the middleware is installed,
/// otherwise from the `X-Correlation-ID` header, otherwise freshly generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Self>() {
            return Ok(*id);
        }

        let id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(id))
    }
}

/// Bearer token extracted from `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'"))?
            .trim();

        if token.is_empty() {
            return Err(AppError::unauthorized("Empty bearer token"));
        }

        Ok(Self(token.to_string()))
    }
}

/// JSON request body.
///
/// Works like [`Json`], but a body that is missing, not JSON or of the wrong
/// shape is answered with the usual `{code, message}` error instead of plain
/// text. The status is the one axum picks (400, 415 or 422).
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::from(rejection)),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        Self::new(rejection.status(), "INVALID_BODY", rejection.body_text())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).expect("Valid request").into_parts().0
    }

    #[tokio::test]
    async fn test_correlation_id_from_header() {
        let uuid = Uuid::new_v4();
        let mut parts = parts(Request::builder().header(CORRELATION_ID_HEADER, uuid.to_string()));

        let id = CorrelationId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id.0, uuid);
    }

    #[tokio::test]
    async fn test_correlation_id_prefers_extension() {
        let assigned = Uuid::new_v4();
        let mut parts = parts(Request::builder().header(CORRELATION_ID_HEADER, Uuid::new_v4().to_string()));
        parts.extensions.insert(CorrelationId(assigned));

        let id = CorrelationId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id.0, assigned);
    }

    #[tokio::test]
    async fn test_correlation_id_generated_when_invalid() {
        let mut parts = parts(Request::builder().header(CORRELATION_ID_HEADER, "not-a-uuid"));

        let id = CorrelationId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_ne!(id.0, Uuid::nil());
    }

    #[tokio::test]
    async fn test_bearer_token() {
        let mut parts = parts(Request::builder().header(AUTHORIZATION, "Bearer s3cret"));

        let token = BearerToken::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(token.0, "s3cret");
    }

    #[tokio::test]
    async fn test_bearer_token_missing() {
        let mut parts = parts(Request::builder());

        let err = BearerToken::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Missing authorization header");
    }

    #[tokio::test]
    async fn test_bearer_token_wrong_scheme() {
        let mut parts = parts(Request::builder().header(AUTHORIZATION, "Basic dXNlcjpwdw=="));

        let err = BearerToken::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Form {
        name: String,
    }

    fn json_request(body: &'static str) -> Request<axum::body::Body> {
        Request::builder()
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body() {
        let JsonBody(form) = JsonBody::<Form>::from_request(json_request(r#"{"name":"Tech Quiz"}"#), &())
            .await
            .unwrap();
        assert_eq!(form.name, "Tech Quiz");
    }

    #[tokio::test]
    async fn test_json_body_wrong_shape() {
        let err = JsonBody::<Form>::from_request(json_request(r#"{"title":"Tech Quiz"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "INVALID_BODY");
        assert!(err.message().contains("missing field `name`"));
    }

    #[tokio::test]
    async fn test_json_body_syntax_error() {
        let err = JsonBody::<Form>::from_request(json_request("{ broken"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_body_needs_content_type() {
        let req = Request::builder()
            .body(axum::body::Body::from(r#"{"name":"Tech Quiz"}"#))
            .unwrap();

        let err = JsonBody::<Form>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_bearer_token_empty() {
        let mut parts = parts(Request::builder().header(AUTHORIZATION, "Bearer   "));

        let err = BearerToken::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.message(), "Empty bearer token");
    }
}
