//! Registration assistant endpoint.
//!
//! - POST /api/chat - One visitor turn; the client keeps the transcript

use crate::metrics;
use crate::server::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::time::Instant;
use symposium_core::assistant::{AssistantError, AssistantReply, ChatInput, Suggestion};
use symposium_web::{AppError, CorrelationId, JsonBody, WebResult};

/// Shown to the visitor whenever the model cannot be reached.
pub const UNAVAILABLE_MESSAGE: &str = "Sorry, I'm having trouble connecting. Please try again later.";

/// One assistant turn.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Reply text with the suggestion links removed
    pub text: String,
    /// Buttons to offer; the label is sent back as the next message
    pub suggestions: Vec<Suggestion>,
    /// No suggestions: this is the final summary
    #[serde(rename = "final")]
    pub is_final: bool,
}

impl From<AssistantReply> for ChatResponse {
    fn from(reply: AssistantReply) -> Self {
        Self {
            is_final: reply.is_final(),
            text: reply.text,
            suggestions: reply.suggestions,
        }
    }
}

/// Answer one visitor turn.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/chat \
///   -H "Content-Type: application/json" \
///   -d '{"message": "Hello There", "history": []}'
/// ```
pub async fn chat(
    CorrelationId(correlation_id): CorrelationId,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ChatInput>,
) -> WebResult<Json<ChatResponse>> {
    let db = state.store.load().await?;

    let started = Instant::now();
    let result = state.assistant.respond(&db, input).await;
    metrics::record_chat_latency(started.elapsed().as_secs_f64());

    match result {
        Ok(reply) => {
            metrics::record_chat_request("ok");
            tracing::info!(%correlation_id, suggestions = reply.suggestions.len(), "Chat turn answered");
            Ok(Json(ChatResponse::from(reply)))
        }
        Err(AssistantError::EmptyMessage) => {
            metrics::record_chat_request("rejected");
            Err(AppError::bad_request("Message must not be empty"))
        }
        Err(err @ AssistantError::Model(_)) => {
            metrics::record_chat_request("unavailable");
            tracing::warn!(%correlation_id, error = %err, "Assistant model call failed");
            Err(AppError::unavailable(UNAVAILABLE_MESSAGE).with_source(err))
        }
        Err(err @ AssistantError::Context(_)) => {
            metrics::record_chat_request("error");
            Err(AppError::internal(UNAVAILABLE_MESSAGE).with_source(err))
        }
    }
}
