//! # Symposium Core
//!
//! Domain model and business logic for the Symposium Central registration site.
//!
//! ## Core Concepts
//!
//! - **Database**: the whole JSON file (departments + events), loaded and
//!   rewritten as one value
//! - **Action**: an admin form submission (`CreateDepartment`, `DeleteEvent`, ...)
//! - **Reducer**: pure function `(Database, Action) → (Outcome, Effects)`
//! - **Effect**: description of I/O for the shell to run (rewrite the file)
//! - **Assistant**: prompt construction, one model call, and suggestion parsing
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection at the model seam (`ChatModel`)
//!
//! ## Example
//!
//! ```
//! use symposium_core::admin::{AdminAction, AdminReducer, DepartmentForm};
//! use symposium_core::effect::Effect;
//! use symposium_core::reducer::Reducer;
//! use symposium_core::types::Database;
//!
//! let mut db = Database::default();
//! let (outcome, effects) = AdminReducer.reduce(
//!     &mut db,
//!     AdminAction::CreateDepartment(DepartmentForm {
//!         id: "cse".to_string(),
//!         name: "Computer Science".to_string(),
//!         head_name: "Ada Lovelace".to_string(),
//!         head_email: "ada@example.edu".to_string(),
//!     }),
//! );
//!
//! assert!(outcome.success);
//! assert_eq!(effects, vec![Effect::Persist]);
//! assert_eq!(db.departments.len(), 1);
//! ```

pub mod admin;
pub mod assistant;
pub mod types;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action) → (Output, Effects)`.
/// They contain all business rules and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Output`: What the caller is told about the action
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The result reported back to the caller
        type Output;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(&self, state: &mut Self::State, action: Self::Action) -> (Self::Output, Vec<Effect>);
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are NOT executed by the reducer. They are returned as values and
/// run by the shell (the site's file store).
pub mod effect {
    /// Effect type - describes a side effect to be executed
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Effect {
        /// No side effect
        None,
        /// Rewrite the whole JSON file with the current state
        Persist,
    }
}

pub use admin::{AdminAction, AdminOutcome, AdminReducer};
pub use assistant::{Assistant, AssistantReply, ChatInput, ChatModel, Suggestion};
pub use types::{Database, Department, Event, EventView};
