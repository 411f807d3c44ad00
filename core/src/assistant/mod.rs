//! Guided registration assistant.
//!
//! One visitor turn is handled as:
//!
//! 1. serialize the catalogue ([`context::build_context`])
//! 2. wrap it with the visitor's selection ([`prompt::build_prompt`])
//! 3. one call to the hosted model ([`ChatModel::complete`])
//! 4. split the reply into text and suggestion buttons ([`reply::parse_reply`])
//!
//! The server keeps no conversation state. Earlier turns arrive with each
//! request as client-held history.

pub mod context;
pub mod model;
pub mod prompt;
pub mod reply;

pub use context::DEFAULT_CONTACT_NUMBER;
pub use model::{AnthropicModel, ChatModel, ChatRequest, ChatTurn, ModelError, Speaker};
pub use reply::{AssistantReply, Suggestion, parse_reply};

use crate::types::Database;
use serde::Deserialize;
use thiserror::Error;

/// Message the chat widget sends when it is first opened
pub const OPENING_MESSAGE: &str = "Hello There";

/// One visitor turn
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChatInput {
    /// The selected option or typed message
    pub message: String,
    /// Earlier turns, oldest first
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl ChatInput {
    /// A first turn with no history
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
        }
    }
}

/// Tunables for the assistant
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistantSettings {
    /// Phone number offered when the assistant cannot help
    pub contact_number: String,
    /// Most recent history turns forwarded to the model
    pub max_history_turns: usize,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            contact_number: DEFAULT_CONTACT_NUMBER.to_string(),
            max_history_turns: 20,
        }
    }
}

/// Assistant failures
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Blank message; the model is not called
    #[error("message must not be empty")]
    EmptyMessage,

    /// Catalogue could not be serialized
    #[error("failed to build context: {0}")]
    Context(#[from] serde_json::Error),

    /// The model call failed
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// The registration assistant
#[derive(Clone, Debug)]
pub struct Assistant<M> {
    model: M,
    settings: AssistantSettings,
}

impl<M: ChatModel> Assistant<M> {
    /// Create an assistant over a model
    #[must_use]
    pub const fn new(model: M, settings: AssistantSettings) -> Self {
        Self { model, settings }
    }

    /// Current settings
    #[must_use]
    pub const fn settings(&self) -> &AssistantSettings {
        &self.settings
    }

    /// Answer one visitor turn against the current catalogue.
    ///
    /// # Errors
    ///
    /// - [`AssistantError::EmptyMessage`] for a blank message
    /// - [`AssistantError::Model`] if the model call fails
    pub async fn respond(&self, db: &Database, input: ChatInput) -> Result<AssistantReply, AssistantError> {
        let message = input.message.trim();
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let context = context::build_context(db, &self.settings.contact_number)?;
        let request = ChatRequest {
            system: prompt::INSTRUCTIONS.to_string(),
            history: normalize_history(input.history, self.settings.max_history_turns),
            user: prompt::build_prompt(&context, message),
        };

        tracing::debug!(history_turns = request.history.len(), "Asking model for next step");
        let raw = self.model.complete(request).await?;
        let reply = parse_reply(&raw);

        tracing::info!(
            suggestions = reply.suggestions.len(),
            is_final = reply.is_final(),
            "Assistant replied"
        );
        Ok(reply)
    }
}

/// Make client-held history acceptable to a chat API: keep the most recent
/// `limit` turns, start with a user turn, merge consecutive turns by the same
/// speaker and end on an assistant turn (the new user turn follows).
fn normalize_history(history: Vec<ChatTurn>, limit: usize) -> Vec<ChatTurn> {
    let skip = history.len().saturating_sub(limit);
    let mut turns: Vec<ChatTurn> = Vec::with_capacity(history.len() - skip);

    for turn in history.into_iter().skip(skip) {
        if turn.text.trim().is_empty() {
            continue;
        }
        match turns.last_mut() {
            Some(last) if last.role == turn.role => {
                last.text.push_str("\n\n");
                last.text.push_str(&turn.text);
            }
            None if turn.role == Speaker::Assistant => {}
            _ => turns.push(turn),
        }
    }

    if turns.last().is_some_and(|t| t.role == Speaker::User) {
        turns.pop();
    }
    turns
}
