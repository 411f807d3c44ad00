//! Admin endpoints for departments and events.
//!
//! - GET    /api/admin/departments      - All departments with heads
//! - POST   /api/admin/departments      - Create a department
//! - PUT    /api/admin/departments/:id  - Update a department
//! - DELETE /api/admin/departments/:id  - Delete a department
//! - GET    /api/admin/events           - All events
//! - GET    /api/admin/events/:id       - Event detail
//! - POST   /api/admin/events           - Create an event
//! - PUT    /api/admin/events/:id       - Update an event
//! - DELETE /api/admin/events/:id       - Delete an event
//!
//! Every mutation answers `{ "success": bool, "message": "..." }`, including
//! a body that cannot be read as the expected form.

use crate::metrics;
use crate::server::state::AppState;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use symposium_core::admin::{AdminAction, AdminOutcome, DepartmentForm, EventForm, OutcomeKind};
use symposium_core::types::{Department, DepartmentId, EventFilter, EventId, EventView};
use symposium_web::{AppError, BearerToken, WebResult};

// ============================================================================
// Access control
// ============================================================================

/// Admin access guard.
///
/// When the server has an admin token, requests must carry it as
/// `Authorization: Bearer <token>`. Without one configured the admin area is
/// open.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

#[async_trait]
impl FromRequestParts<AppState> for AdminAccess {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token.as_deref() else {
            return Ok(Self);
        };

        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        if !token_matches(&token, expected) {
            tracing::warn!("Rejected admin request with wrong token");
            return Err(AppError::unauthorized("Invalid admin token"));
        }

        Ok(Self)
    }
}

fn token_matches(token: &str, expected: &str) -> bool {
    constant_time_eq::constant_time_eq(token.as_bytes(), expected.as_bytes())
}

// ============================================================================
// Request bodies
// ============================================================================

/// Admin form body.
///
/// An unreadable body is answered like any other rejected action, as an
/// [`AdminOutcome`] with `success: false`, under the status axum picks for
/// the rejection (400, 415 or 422).
#[derive(Debug, Clone)]
pub struct AdminForm<T>(pub T);

/// Rejection for [`AdminForm`].
#[derive(Debug)]
pub struct FormRejection {
    status: StatusCode,
    outcome: AdminOutcome,
}

impl IntoResponse for FormRejection {
    fn into_response(self) -> Response {
        (self.status, Json(self.outcome)).into_response()
    }
}

#[async_trait]
impl<T> FromRequest<AppState> for AdminForm<T>
where
    T: DeserializeOwned,
{
    type Rejection = FormRejection;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(form)) => Ok(Self(form)),
            Err(rejection) => {
                let message = rejection.body_text();
                tracing::info!(error = %message, "Rejected admin form");
                Err(FormRejection {
                    status: rejection.status(),
                    outcome: AdminOutcome::rejected(message),
                })
            }
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// List every department, head details included.
pub async fn list_departments(
    _access: AdminAccess,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<Department>>> {
    Ok(Json(state.store.load().await?.departments))
}

/// Create a department.
pub async fn create_department(
    _access: AdminAccess,
    State(state): State<AppState>,
    AdminForm(form): AdminForm<DepartmentForm>,
) -> WebResult<(StatusCode, Json<AdminOutcome>)> {
    dispatch(&state, AdminAction::CreateDepartment(form)).await
}

/// Update a department's name and head. The path id wins over the body.
pub async fn update_department(
    _access: AdminAccess,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AdminForm(mut form): AdminForm<DepartmentForm>,
) -> WebResult<(StatusCode, Json<AdminOutcome>)> {
    form.id = id;
    dispatch(&state, AdminAction::UpdateDepartment(form)).await
}

/// Delete a department.
pub async fn delete_department(
    _access: AdminAccess,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<(StatusCode, Json<AdminOutcome>)> {
    let id = DepartmentId::new(id);
    dispatch(&state, AdminAction::DeleteDepartment { id }).await
}

/// List every event for the admin portal.
pub async fn list_events(
    _access: AdminAccess,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<EventView>>> {
    let db = state.store.load().await?;
    Ok(Json(db.event_views(&EventFilter::default())))
}

/// Event detail for the admin portal.
pub async fn get_event(
    _access: AdminAccess,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<Json<EventView>> {
    let db = state.store.load().await?;
    db.event_view(&EventId::new(id.as_str()))
        .map(Json)
        .ok_or_else(|| AppError::not_found("Event", id))
}

/// Create an event.
pub async fn create_event(
    _access: AdminAccess,
    State(state): State<AppState>,
    AdminForm(form): AdminForm<EventForm>,
) -> WebResult<(StatusCode, Json<AdminOutcome>)> {
    dispatch(&state, AdminAction::CreateEvent(form)).await
}

/// Replace an event's fields. The path id wins over the body.
pub async fn update_event(
    _access: AdminAccess,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AdminForm(mut form): AdminForm<EventForm>,
) -> WebResult<(StatusCode, Json<AdminOutcome>)> {
    form.id = id;
    dispatch(&state, AdminAction::UpdateEvent(form)).await
}

/// Delete an event.
pub async fn delete_event(
    _access: AdminAccess,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<(StatusCode, Json<AdminOutcome>)> {
    let id = EventId::new(id);
    dispatch(&state, AdminAction::DeleteEvent { id }).await
}

async fn dispatch(state: &AppState, action: AdminAction) -> WebResult<(StatusCode, Json<AdminOutcome>)> {
    let name = action.name();

    let outcome = match state.store.update(action).await {
        Ok(outcome) => outcome,
        Err(err) => {
            metrics::record_admin_action(name, "error");
            return Err(err.into());
        }
    };

    metrics::record_admin_action(name, metrics::outcome_label(outcome.kind));
    tracing::info!(action = name, success = outcome.success, message = %outcome.message, "Admin action handled");

    Ok((status_for(outcome.kind), Json(outcome)))
}

const fn status_for(kind: OutcomeKind) -> StatusCode {
    match kind {
        OutcomeKind::Applied => StatusCode::OK,
        OutcomeKind::Conflict => StatusCode::CONFLICT,
        OutcomeKind::NotFound => StatusCode::NOT_FOUND,
        OutcomeKind::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
    }
}
