//! Public department listing.

use crate::server::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use symposium_core::types::{DepartmentSummary, EventCategory, EventMode};
use symposium_web::WebResult;

/// Query parameters for listing departments.
#[derive(Debug, Default, Deserialize)]
pub struct DepartmentQuery {
    /// Only departments hosting events in this mode
    pub mode: Option<EventMode>,
    /// Only departments hosting events in this category
    pub category: Option<EventCategory>,
}

/// List departments without head contact details.
///
/// With no parameters every department is listed. With `mode` and/or
/// `category`, only departments hosting a matching event.
///
/// ```bash
/// curl 'http://localhost:8080/api/departments?mode=Online'
/// ```
pub async fn list_departments(
    State(state): State<AppState>,
    Query(query): Query<DepartmentQuery>,
) -> WebResult<Json<Vec<DepartmentSummary>>> {
    let db = state.store.load().await?;

    let departments = if query.mode.is_none() && query.category.is_none() {
        db.departments.iter().map(DepartmentSummary::from).collect()
    } else {
        db.departments_with_events(query.mode, query.category)
            .into_iter()
            .map(DepartmentSummary::from)
            .collect()
    };

    Ok(Json(departments))
}
