//! The seam between the assistant and the hosted model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use symposium_anthropic::{AnthropicClient, ClaudeError, Message, MessagesRequest};
use thiserror::Error;

/// Who spoke a turn of the conversation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The visitor
    User,
    /// The assistant
    Assistant,
}

/// One prior turn, as held by the client
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who spoke
    pub role: Speaker,
    /// What was said
    pub text: String,
}

/// Everything the model sees for one reply
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
    /// Standing instructions
    pub system: String,
    /// Earlier turns, oldest first, alternating and starting with the user
    pub history: Vec<ChatTurn>,
    /// The new user turn (context + selected option)
    pub user: String,
}

/// Model call failures
#[derive(Debug, Error)]
pub enum ModelError {
    /// The provider could not be reached or refused the request
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with no text
    #[error("model returned an empty reply")]
    EmptyReply,
}

impl From<ClaudeError> for ModelError {
    fn from(err: ClaudeError) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// A hosted language model that completes one chat turn
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Produce the assistant's next reply
    async fn complete(&self, request: ChatRequest) -> Result<String, ModelError>;
}

#[async_trait]
impl<M: ChatModel + ?Sized> ChatModel for Arc<M> {
    async fn complete(&self, request: ChatRequest) -> Result<String, ModelError> {
        (**self).complete(request).await
    }
}

/// [`ChatModel`] backed by the Anthropic Messages API
#[derive(Clone, Debug)]
pub struct AnthropicModel {
    client: AnthropicClient,
    model: String,
    max_tokens: u32,
}

impl AnthropicModel {
    /// Wrap a client with the model name and token budget to use
    #[must_use]
    pub const fn new(client: AnthropicClient, model: String, max_tokens: u32) -> Self {
        Self {
            client,
            model,
            max_tokens,
        }
    }
}

#[async_trait]
impl ChatModel for AnthropicModel {
    async fn complete(&self, request: ChatRequest) -> Result<String, ModelError> {
        let mut messages: Vec<Message> = request
            .history
            .into_iter()
            .map(|turn| match turn.role {
                Speaker::User => Message::user(turn.text),
                Speaker::Assistant => Message::assistant(turn.text),
            })
            .collect();
        messages.push(Message::user(request.user));

        let response = self
            .client
            .messages(
                MessagesRequest::new(messages)
                    .with_model(self.model.clone())
                    .with_max_tokens(self.max_tokens)
                    .with_system(request.system),
            )
            .await?;

        tracing::debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Model reply received"
        );

        let text = response.text();
        if text.trim().is_empty() {
            return Err(ModelError::EmptyReply);
        }
        Ok(text)
    }
}
