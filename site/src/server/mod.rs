//! HTTP server module for the symposium site.
//!
//! - Application state
//! - Health and readiness endpoints
//! - Router configuration

pub mod health;
pub mod routes;
pub mod state;

pub use health::{metrics_endpoint, readiness_check};
pub use routes::build_router;
pub use state::AppState;
