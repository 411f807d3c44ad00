//! Domain types for Symposium Central.
//!
//! The whole site is backed by one JSON document:
//!
//! ```json
//! {
//!   "departments": [{ "id": "cse", "name": "Computer Science", "head": { "name": "...", "email": "..." } }],
//!   "events": [{ "id": "hackathon-2024", "name": "Hackathon 2024", "departmentId": "cse", ... }]
//! }
//! ```
//!
//! Every read surface (public listing, admin portal, assistant context) works
//! on [`EventView`], an event joined with its department.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Administrator-chosen department identifier (e.g. `cse`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(String);

impl DepartmentId {
    /// Wrap a raw id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Administrator-chosen event identifier (e.g. `hackathon-2024`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Wrap a raw id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Departments
// ============================================================================

/// Contact person for a department
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentHead {
    /// Full name
    pub name: String,
    /// Email address confirmations are addressed to
    pub email: String,
}

/// An academic department hosting events
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique id
    pub id: DepartmentId,
    /// Display name
    pub name: String,
    /// Department head, if one is on record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<DepartmentHead>,
}

/// Department without contact details, for public listings
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DepartmentSummary {
    /// Unique id
    pub id: DepartmentId,
    /// Display name
    pub name: String,
}

impl From<&Department> for DepartmentSummary {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id.clone(),
            name: department.name.clone(),
        }
    }
}

// ============================================================================
// Events
// ============================================================================

/// Whether an event runs online or on site
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventMode {
    /// Remote attendance
    Online,
    /// On-site attendance
    Offline,
}

impl fmt::Display for EventMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "Online"),
            Self::Offline => write!(f, "Offline"),
        }
    }
}

/// Event category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Technical events (hackathons, paper presentations, ...)
    Technical,
    /// Non-technical events (quizzes, cultural events, ...)
    #[serde(rename = "Non-Technical")]
    NonTechnical,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Technical => write!(f, "Technical"),
            Self::NonTechnical => write!(f, "Non-Technical"),
        }
    }
}

/// A symposium event as stored in the JSON file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique id
    pub id: EventId,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Day the event takes place
    pub date: NaiveDate,
    /// Registration fee in whole currency units
    pub registration_fee: u32,
    /// Online or offline
    pub mode: EventMode,
    /// Technical or non-technical
    pub category: EventCategory,
    /// Hosting department
    pub department_id: DepartmentId,
    /// Venue, for offline events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Banner image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// An event joined with its hosting department
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    /// Unique id
    pub id: EventId,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Day the event takes place
    pub date: NaiveDate,
    /// Registration fee in whole currency units
    pub registration_fee: u32,
    /// Online or offline
    pub mode: EventMode,
    /// Technical or non-technical
    pub category: EventCategory,
    /// Venue, for offline events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Banner image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Hosting department. `None` only if the file references a department
    /// that no longer exists.
    pub department: Option<Department>,
}

impl EventView {
    fn join(event: &Event, department: Option<&Department>) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            description: event.description.clone(),
            date: event.date,
            registration_fee: event.registration_fee,
            mode: event.mode,
            category: event.category,
            venue: event.venue.clone(),
            image_url: event.image_url.clone(),
            department: department.cloned(),
        }
    }
}

/// Predicate over events; every unset field matches everything
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EventFilter {
    /// Only events in this mode
    pub mode: Option<EventMode>,
    /// Only events in this category
    pub category: Option<EventCategory>,
    /// Only events hosted by this department
    #[serde(rename = "department")]
    pub department_id: Option<DepartmentId>,
}

impl EventFilter {
    /// Does `event` satisfy the filter?
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        self.mode.is_none_or(|mode| event.mode == mode)
            && self.category.is_none_or(|category| event.category == category)
            && self
                .department_id
                .as_ref()
                .is_none_or(|id| &event.department_id == id)
    }
}

// ============================================================================
// Database
// ============================================================================

/// The whole JSON file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// All departments, in file order
    #[serde(default)]
    pub departments: Vec<Department>,
    /// All events, in file order
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Database {
    /// Look up a department by id
    #[must_use]
    pub fn department(&self, id: &DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| &d.id == id)
    }

    /// Look up an event by id
    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Look up an event and join its department
    #[must_use]
    pub fn event_view(&self, id: &EventId) -> Option<EventView> {
        self.event(id)
            .map(|event| EventView::join(event, self.department(&event.department_id)))
    }

    /// All events matching `filter`, joined with their departments, in file order
    #[must_use]
    pub fn event_views(&self, filter: &EventFilter) -> Vec<EventView> {
        self.events
            .iter()
            .filter(|event| filter.matches(event))
            .map(|event| EventView::join(event, self.department(&event.department_id)))
            .collect()
    }

    /// Departments hosting at least one event in the given mode and category
    #[must_use]
    pub fn departments_with_events(
        &self,
        mode: Option<EventMode>,
        category: Option<EventCategory>,
    ) -> Vec<&Department> {
        let filter = EventFilter {
            mode,
            category,
            department_id: None,
        };

        self.departments
            .iter()
            .filter(|department| {
                self.events
                    .iter()
                    .any(|event| event.department_id == department.id && filter.matches(event))
            })
            .collect()
    }

    /// Does any event reference this department?
    #[must_use]
    pub fn has_events_for(&self, id: &DepartmentId) -> bool {
        self.events.iter().any(|event| &event.department_id == id)
    }
}
