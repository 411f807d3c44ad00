//! Handlers shared by every service built on this crate.

pub mod health;

pub use health::{Health, health_check};
