//! Serializes the event catalogue into the text the model answers from.

use crate::types::{Database, EventCategory, EventMode};
use chrono::NaiveDate;
use serde::Serialize;

/// Fallback phone number offered when the assistant cannot answer
pub const DEFAULT_CONTACT_NUMBER: &str = "+1-800-555-1234";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventEntry<'a> {
    name: &'a str,
    description: &'a str,
    date: NaiveDate,
    fee: u32,
    mode: EventMode,
    category: EventCategory,
    department: Option<&'a str>,
    department_id: &'a str,
    department_head_email: Option<&'a str>,
}

#[derive(Serialize)]
struct DepartmentEntry<'a> {
    id: &'a str,
    name: &'a str,
}

/// Build the `Events:` / `Departments:` / `Contact Number:` block.
///
/// # Errors
///
/// Returns an error if serialization fails, which only happens for
/// non-string map keys and therefore not for these types.
pub fn build_context(db: &Database, contact_number: &str) -> Result<String, serde_json::Error> {
    let events: Vec<EventEntry<'_>> = db
        .events
        .iter()
        .map(|event| {
            let department = db.department(&event.department_id);
            EventEntry {
                name: &event.name,
                description: &event.description,
                date: event.date,
                fee: event.registration_fee,
                mode: event.mode,
                category: event.category,
                department: department.map(|d| d.name.as_str()),
                department_id: event.department_id.as_str(),
                department_head_email: department
                    .and_then(|d| d.head.as_ref())
                    .map(|head| head.email.as_str()),
            }
        })
        .collect();

    let departments: Vec<DepartmentEntry<'_>> = db
        .departments
        .iter()
        .map(|d| DepartmentEntry {
            id: d.id.as_str(),
            name: &d.name,
        })
        .collect();

    Ok(format!(
        "Events: {}\nDepartments: {}\nContact Number: \"{contact_number}\"",
        serde_json::to_string_pretty(&events)?,
        serde_json::to_string_pretty(&departments)?,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code
mod tests {
    use super::*;

    fn database() -> Database {
        serde_json::from_str(
            r#"{
                "departments": [
                    { "id": "cse", "name": "Computer Science", "head": { "name": "Ada", "email": "ada@example.edu" } },
                    { "id": "arts", "name": "Fine Arts" }
                ],
                "events": [
                    { "id": "hack", "name": "Hackathon 2024", "description": "Build things", "date": "2024-09-01",
                      "registrationFee": 200, "mode": "Online", "category": "Technical", "departmentId": "cse" },
                    { "id": "sketch", "name": "Sketching", "description": "Draw", "date": "2024-09-02",
                      "registrationFee": 0, "mode": "Offline", "category": "Non-Technical", "departmentId": "arts" }
                ]
            }"#,
        )
        .expect("fixture parses")
    }

    fn section<'a>(context: &'a str, start: &str, end: &str) -> &'a str {
        let from = context.find(start).unwrap() + start.len();
        let to = context.find(end).unwrap();
        context[from..to].trim()
    }

    #[test]
    fn test_events_section_fields() {
        let context = build_context(&database(), DEFAULT_CONTACT_NUMBER).unwrap();
        let events: serde_json::Value =
            serde_json::from_str(section(&context, "Events:", "Departments:")).unwrap();

        assert_eq!(
            events[0],
            serde_json::json!({
                "name": "Hackathon 2024",
                "description": "Build things",
                "date": "2024-09-01",
                "fee": 200,
                "mode": "Online",
                "category": "Technical",
                "department": "Computer Science",
                "departmentId": "cse",
                "departmentHeadEmail": "ada@example.edu"
            })
        );
        assert_eq!(events[1]["departmentHeadEmail"], serde_json::Value::Null);
        assert_eq!(events[1]["category"], "Non-Technical");
    }

    #[test]
    fn test_departments_section_has_only_id_and_name() {
        let context = build_context(&database(), DEFAULT_CONTACT_NUMBER).unwrap();
        let departments: serde_json::Value =
            serde_json::from_str(section(&context, "Departments:", "Contact Number:")).unwrap();

        assert_eq!(
            departments,
            serde_json::json!([
                { "id": "cse", "name": "Computer Science" },
                { "id": "arts", "name": "Fine Arts" }
            ])
        );
    }

    #[test]
    fn test_contact_number_line() {
        let context = build_context(&Database::default(), "+44 20 7946 0000").unwrap();
        assert!(context.ends_with("Contact Number: \"+44 20 7946 0000\""));
        assert!(context.starts_with("Events: []"));
    }
}
