//! Symposium Central HTTP server.
//!
//! Serves the public event catalogue, the admin area and the registration
//! assistant over one JSON database file.
//!
//! # Modules
//!
//! - [`config`]: environment-driven configuration
//! - [`store`]: the JSON file store and admin action execution
//! - [`api`]: JSON handlers
//! - [`server`]: state, router and ops endpoints
//! - [`metrics`]: Prometheus metrics

pub mod api;
pub mod config;
pub mod metrics;
pub mod server;
pub mod store;

pub use config::Config;
pub use server::{build_router, AppState};
pub use store::{JsonFileStore, StoreError};
