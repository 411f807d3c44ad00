//! # Symposium Testing
//!
//! Testing utilities and helpers for Symposium Central.
//!
//! This crate provides:
//! - A sample catalogue ([`fixtures::sample_database`]) covering every mode and category
//! - Scripted and failing [`ChatModel`](symposium_core::ChatModel) implementations
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//!
//! ## Example
//!
//! ```
//! use symposium_core::assistant::{Assistant, AssistantSettings, ChatInput};
//! use symposium_testing::{fixtures::sample_database, mocks::ScriptedModel};
//!
//! # tokio_test::block_on(async {
//! let model = ScriptedModel::new(["Hi!\n- [Register for an Event](suggestion:Register for an Event)"]);
//! let assistant = Assistant::new(model.clone(), AssistantSettings::default());
//!
//! let reply = assistant
//!     .respond(&sample_database(), ChatInput::new("Hello There"))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(reply.suggestions[0].label, "Register for an Event");
//! assert_eq!(model.requests().len(), 1);
//! # });
//! ```


pub use reducer_test::{ReducerTest, assertions};

/// Sample data shared by tests across the workspace.
pub mod fixtures {
    use chrono::NaiveDate;
    use symposium_core::types::{
        Database, Department, DepartmentHead, DepartmentId, Event, EventCategory, EventId, EventMode,
    };

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, day).unwrap_or_default()
    }

    /// A department with a head on record
    #[must_use]
    pub fn department(id: &str, name: &str, head_email: &str) -> Department {
        Department {
            id: DepartmentId::new(id),
            name: name.to_string(),
            head: Some(DepartmentHead {
                name: format!("Head of {name}"),
                email: head_email.to_string(),
            }),
        }
    }

    /// An event on 2024-09-`day`
    #[must_use]
    pub fn event(
        id: &str,
        name: &str,
        department_id: &str,
        mode: EventMode,
        category: EventCategory,
        day: u32,
    ) -> Event {
        Event {
            id: EventId::new(id),
            name: name.to_string(),
            description: format!("{name} at the symposium"),
            date: date(day),
            registration_fee: 150,
            mode,
            category,
            department_id: DepartmentId::new(department_id),
            venue: (mode == EventMode::Offline).then(|| "Main Auditorium".to_string()),
            image_url: None,
        }
    }

    /// Three departments and five events:
    ///
    /// | id | department | mode | category |
    /// |----|------------|------|----------|
    /// | `hackathon-2024` | cse | Online | Technical |
    /// | `code-golf` | cse | Offline | Technical |
    /// | `tech-quiz` | cse | Offline | Non-Technical |
    /// | `robo-race` | mech | Offline | Technical |
    /// | `photo-walk` | mech | Online | Non-Technical |
    ///
    /// `civil` hosts nothing.
    #[must_use]
    pub fn sample_database() -> Database {
        Database {
            departments: vec![
                department("cse", "Computer Science and Engineering", "cse.head@example.edu"),
                department("mech", "Mechanical Engineering", "mech.head@example.edu"),
                Department {
                    id: DepartmentId::new("civil"),
                    name: "Civil Engineering".to_string(),
                    head: None,
                },
            ],
            events: vec![
                event("hackathon-2024", "Hackathon 2024", "cse", EventMode::Online, EventCategory::Technical, 1),
                event("code-golf", "Code Golf", "cse", EventMode::Offline, EventCategory::Technical, 2),
                event("tech-quiz", "Tech Quiz", "cse", EventMode::Offline, EventCategory::NonTechnical, 2),
                event("robo-race", "Robo Race", "mech", EventMode::Offline, EventCategory::Technical, 3),
                event("photo-walk", "Photo Walk", "mech", EventMode::Online, EventCategory::NonTechnical, 4),
            ],
        }
    }
}

/// Mock implementations of the model seam.
pub mod mocks {
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, PoisonError};
    use symposium_core::assistant::{ChatModel, ChatRequest, ModelError};

    #[derive(Debug, Default)]
    struct Script {
        replies: VecDeque<String>,
        requests: Vec<ChatRequest>,
    }

    /// Replies with canned text, in order, and records every request.
    ///
    /// Clones share the same script, so a test can keep a handle after
    /// moving the model into an assistant. Once the script is exhausted the
    /// model reports [`ModelError::EmptyReply`].
    #[derive(Clone, Debug, Default)]
    pub struct ScriptedModel {
        script: Arc<Mutex<Script>>,
    }

    impl ScriptedModel {
        /// Script the given replies
        #[must_use]
        pub fn new<I, T>(replies: I) -> Self
        where
            I: IntoIterator<Item = T>,
            T: Into<String>,
        {
            Self {
                script: Arc::new(Mutex::new(Script {
                    replies: replies.into_iter().map(Into::into).collect(),
                    requests: Vec::new(),
                })),
            }
        }

        /// Requests received so far
        #[must_use]
        pub fn requests(&self) -> Vec<ChatRequest> {
            self.script
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .requests
                .clone()
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, request: ChatRequest) -> Result<String, ModelError> {
            let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
            script.requests.push(request);
            script.replies.pop_front().ok_or(ModelError::EmptyReply)
        }
    }

    /// Always fails as if the provider were unreachable.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        async fn complete(&self, _request: ChatRequest) -> Result<String, ModelError> {
            Err(ModelError::Unavailable("connection refused".to_string()))
        }
    }
}
