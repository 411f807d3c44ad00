//! Axum plumbing for the Symposium Central site.
//!
//! The site follows a "Functional Core, Imperative Shell" split:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, bearer tokens
//! │  - Request parsing                      │  ← JSON file store
//! │  - Response serialization               │  ← Logging, metrics
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - Admin reducer                        │  ← No I/O
//! │  - Catalogue queries                    │  ← Plain data in, plain data out
//! │  - Reply parsing                        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! This crate holds the shell pieces that do not depend on the domain:
//! the [`AppError`] response type, the correlation ID middleware, request
//! extractors and the liveness handler.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

pub use error::AppError;
pub use extractors::{BearerToken, CorrelationId, JsonBody};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
