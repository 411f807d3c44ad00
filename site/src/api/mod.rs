//! JSON API handlers.
//!
//! - `events`, `departments`: public catalogue
//! - `chat`: registration assistant
//! - `admin`: department and event management

pub mod admin;
pub mod chat;
pub mod departments;
pub mod events;

use crate::store::StoreError;
use symposium_web::AppError;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal("The event database is unavailable").with_source(err)
    }
}
