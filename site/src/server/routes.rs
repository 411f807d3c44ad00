//! Router configuration for the symposium site.

use super::health::{metrics_endpoint, readiness_check};
use super::state::AppState;
use crate::api::{admin, chat, departments, events};
use axum::{
    routing::{get, post, put},
    Router,
};
use symposium_web::correlation_id_layer;
use symposium_web::handlers::health_check;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// - Ops: `/health`, `/ready`, `/metrics`
/// - Public API under `/api`
/// - Admin API under `/api/admin`
pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/departments",
            get(admin::list_departments).post(admin::create_department),
        )
        .route(
            "/departments/:id",
            put(admin::update_department).delete(admin::delete_department),
        )
        .route("/events", get(admin::list_events).post(admin::create_event))
        .route(
            "/events/:id",
            get(admin::get_event)
                .put(admin::update_event)
                .delete(admin::delete_event),
        );

    let api_routes = Router::new()
        .route("/events", get(events::list_events))
        .route("/events/:id", get(events::get_event))
        .route("/departments", get(departments::list_departments))
        .route("/chat", post(chat::chat))
        .nest("/admin", admin_routes);

    Router::new()
        .route("/health", get(health_check(env!("CARGO_PKG_VERSION"))))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
