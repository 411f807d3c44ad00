//! # Anthropic Messages API Client
//!
//! A small, non-streaming client for the Anthropic Messages API. The
//! registration assistant sends one request per chat turn and reads the
//! text blocks of the reply.
//!
//! ## Example
//!
//! ```no_run
//! use symposium_anthropic::{AnthropicClient, MessagesRequest};
//! use symposium_anthropic::types::Message;
//!
//! # async fn run() -> Result<(), symposium_anthropic::ClaudeError> {
//! let client = AnthropicClient::from_env()?;
//!
//! let request = MessagesRequest::new(vec![Message::user("Hello There")])
//!     .with_system("You are a symposium registration helper.".to_string());
//!
//! let response = client.messages(request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod messages;
pub mod types;

pub use client::{AnthropicClient, DEFAULT_API_URL};
pub use error::ClaudeError;
pub use messages::{DEFAULT_MODEL, MessagesRequest, MessagesResponse};
pub use types::{ContentBlock, Message, Role, StopReason, Usage};
