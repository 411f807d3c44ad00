//! Public event endpoints.
//!
//! - GET /api/events - List events, optionally filtered by `mode`, `category`, `department`
//! - GET /api/events/:id - Event detail with its department

use crate::server::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use symposium_core::types::{EventFilter, EventId, EventView};
use symposium_web::{AppError, WebResult};

/// List events in file order.
///
/// ```bash
/// curl 'http://localhost:8080/api/events?mode=Offline&category=Non-Technical&department=cse'
/// ```
pub async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> WebResult<Json<Vec<EventView>>> {
    let db = state.store.load().await?;
    let events = db.event_views(&filter);

    tracing::debug!(?filter, count = events.len(), "Listed events");
    Ok(Json(events))
}

/// Get one event by id.
///
/// ```bash
/// curl http://localhost:8080/api/events/hackathon-2024
/// ```
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<Json<EventView>> {
    let db = state.store.load().await?;
    db.event_view(&EventId::new(id.as_str()))
        .map(Json)
        .ok_or_else(|| AppError::not_found("Event", id))
}
