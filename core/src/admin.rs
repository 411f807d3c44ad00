//! Admin actions over departments and events.
//!
//! Every admin form submission becomes an [`AdminAction`]. The
//! [`AdminReducer`] validates it against the current [`Database`], mutates
//! the database in place and answers with an [`AdminOutcome`] plus the
//! effects the shell must run. A rejected action leaves the database
//! untouched and returns no effect; an accepted one returns exactly one
//! [`Effect::Persist`].
//!
//! ```text
//! form ──► AdminAction ──► AdminReducer::reduce(&mut Database) ──► (AdminOutcome, [Persist])
//!                                                                          │
//!                                                 shell rewrites file ◄────┘
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use crate::types::{
    Database, Department, DepartmentHead, DepartmentId, Event, EventCategory, EventId, EventMode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Forms
// ============================================================================

/// Department form fields (`id`, `name`, `headName`, `headEmail`)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentForm {
    /// Department id; for updates this names the department to change
    #[serde(default)]
    pub id: String,
    /// Display name
    pub name: String,
    /// Head's name (may be blank)
    #[serde(default)]
    pub head_name: String,
    /// Head's email (may be blank)
    #[serde(default)]
    pub head_email: String,
}

impl DepartmentForm {
    fn head(&self) -> Option<DepartmentHead> {
        let name = self.head_name.trim();
        let email = self.head_email.trim();
        if name.is_empty() && email.is_empty() {
            return None;
        }
        Some(DepartmentHead {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    fn validate(&self) -> Result<(), AdminOutcome> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(AdminOutcome::invalid("ID and name are required."));
        }
        let email = self.head_email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(AdminOutcome::invalid("Department head email is invalid."));
        }
        Ok(())
    }
}

/// Event form fields
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    /// Event id; for updates this names the event to change
    #[serde(default)]
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Day the event takes place
    pub date: NaiveDate,
    /// Registration fee in whole currency units
    #[serde(default)]
    pub registration_fee: u32,
    /// Online or offline
    pub mode: EventMode,
    /// Technical or non-technical
    pub category: EventCategory,
    /// Hosting department
    pub department_id: String,
    /// Venue, for offline events
    #[serde(default)]
    pub venue: Option<String>,
    /// Banner image
    #[serde(default)]
    pub image_url: Option<String>,
}

impl EventForm {
    fn validate(&self, db: &Database) -> Result<(), AdminOutcome> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(AdminOutcome::invalid("ID and name are required."));
        }
        if db.department(&DepartmentId::new(self.department_id.trim())).is_none() {
            return Err(AdminOutcome::not_found("Department not found."));
        }
        Ok(())
    }

    fn into_event(self) -> Event {
        Event {
            id: EventId::new(self.id.trim()),
            name: self.name.trim().to_string(),
            description: self.description,
            date: self.date,
            registration_fee: self.registration_fee,
            mode: self.mode,
            category: self.category,
            department_id: DepartmentId::new(self.department_id.trim()),
            venue: self.venue.filter(|v| !v.trim().is_empty()),
            image_url: self.image_url.filter(|u| !u.trim().is_empty()),
        }
    }
}

// ============================================================================
// Actions and outcome
// ============================================================================

/// Admin actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminAction {
    /// Add a department
    CreateDepartment(DepartmentForm),
    /// Rename a department or change its head
    UpdateDepartment(DepartmentForm),
    /// Remove a department
    DeleteDepartment {
        /// Department to remove
        id: DepartmentId,
    },
    /// Add an event
    CreateEvent(EventForm),
    /// Replace an event's fields
    UpdateEvent(EventForm),
    /// Remove an event
    DeleteEvent {
        /// Event to remove
        id: EventId,
    },
}

impl AdminAction {
    /// Stable name for logs and metric labels
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateDepartment(_) => "create_department",
            Self::UpdateDepartment(_) => "update_department",
            Self::DeleteDepartment { .. } => "delete_department",
            Self::CreateEvent(_) => "create_event",
            Self::UpdateEvent(_) => "update_event",
            Self::DeleteEvent { .. } => "delete_event",
        }
    }
}

/// Why an action was rejected (or that it was not)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeKind {
    /// Applied
    Applied,
    /// Id already taken
    Conflict,
    /// Referenced record does not exist
    NotFound,
    /// Form failed validation
    Invalid,
}

/// Answer to an admin action, as shown to the administrator
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdminOutcome {
    /// Whether the action was applied
    pub success: bool,
    /// Human-readable result
    pub message: String,
    /// Classification used to pick an HTTP status
    #[serde(skip)]
    pub kind: OutcomeKind,
}

impl AdminOutcome {
    /// A request that never reached the reducer, e.g. an unreadable form
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            kind: OutcomeKind::Invalid,
        }
    }

    fn applied(message: &str) -> Self {
        Self::with_kind(OutcomeKind::Applied, message)
    }

    fn conflict(message: &str) -> Self {
        Self::with_kind(OutcomeKind::Conflict, message)
    }

    fn not_found(message: &str) -> Self {
        Self::with_kind(OutcomeKind::NotFound, message)
    }

    fn invalid(message: &str) -> Self {
        Self::with_kind(OutcomeKind::Invalid, message)
    }

    fn with_kind(kind: OutcomeKind, message: &str) -> Self {
        Self {
            success: kind == OutcomeKind::Applied,
            message: message.to_string(),
            kind,
        }
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for admin actions
#[derive(Clone, Copy, Debug, Default)]
pub struct AdminReducer;

impl AdminReducer {
    fn create_department(db: &mut Database, form: DepartmentForm) -> Result<AdminOutcome, AdminOutcome> {
        form.validate()?;
        let id = DepartmentId::new(form.id.trim());
        if db.department(&id).is_some() {
            return Err(AdminOutcome::conflict("Department ID already exists."));
        }

        db.departments.push(Department {
            head: form.head(),
            name: form.name.trim().to_string(),
            id,
        });
        Ok(AdminOutcome::applied("Department created successfully."))
    }

    fn update_department(db: &mut Database, form: DepartmentForm) -> Result<AdminOutcome, AdminOutcome> {
        let id = DepartmentId::new(form.id.trim());
        if db.department(&id).is_none() {
            return Err(AdminOutcome::not_found("Department not found."));
        }
        form.validate()?;

        let head = form.head();
        if let Some(department) = db.departments.iter_mut().find(|d| d.id == id) {
            department.name = form.name.trim().to_string();
            department.head = head;
        }
        Ok(AdminOutcome::applied("Department updated successfully."))
    }

    fn delete_department(db: &mut Database, id: &DepartmentId) -> Result<AdminOutcome, AdminOutcome> {
        if db.has_events_for(id) {
            return Err(AdminOutcome::conflict(
                "Department has events; delete or move them first.",
            ));
        }

        db.departments.retain(|d| &d.id != id);
        Ok(AdminOutcome::applied("Department deleted successfully."))
    }

    fn create_event(db: &mut Database, form: EventForm) -> Result<AdminOutcome, AdminOutcome> {
        if !form.id.trim().is_empty() && db.event(&EventId::new(form.id.trim())).is_some() {
            return Err(AdminOutcome::conflict("Event ID already exists."));
        }
        form.validate(db)?;

        db.events.push(form.into_event());
        Ok(AdminOutcome::applied("Event created successfully."))
    }

    fn update_event(db: &mut Database, form: EventForm) -> Result<AdminOutcome, AdminOutcome> {
        let id = EventId::new(form.id.trim());
        if db.event(&id).is_none() {
            return Err(AdminOutcome::not_found("Event not found."));
        }
        form.validate(db)?;

        let updated = form.into_event();
        if let Some(event) = db.events.iter_mut().find(|e| e.id == id) {
            *event = updated;
        }
        Ok(AdminOutcome::applied("Event updated successfully."))
    }

    fn delete_event(db: &mut Database, id: &EventId) -> AdminOutcome {
        db.events.retain(|e| &e.id != id);
        AdminOutcome::applied("Event deleted successfully.")
    }
}

impl Reducer for AdminReducer {
    type State = Database;
    type Action = AdminAction;
    type Output = AdminOutcome;

    fn reduce(&self, state: &mut Database, action: AdminAction) -> (AdminOutcome, Vec<Effect>) {
        let result = match action {
            AdminAction::CreateDepartment(form) => Self::create_department(state, form),
            AdminAction::UpdateDepartment(form) => Self::update_department(state, form),
            AdminAction::DeleteDepartment { id } => Self::delete_department(state, &id),
            AdminAction::CreateEvent(form) => Self::create_event(state, form),
            AdminAction::UpdateEvent(form) => Self::update_event(state, form),
            AdminAction::DeleteEvent { id } => Ok(Self::delete_event(state, &id)),
        };

        match result {
            Ok(outcome) => (outcome, vec![Effect::Persist]),
            Err(outcome) => (outcome, vec![Effect::None]),
        }
    }
}
