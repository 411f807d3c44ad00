//! Application state for the symposium HTTP server.

use crate::config::{AssistantConfig, Config};
use crate::store::JsonFileStore;
use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use symposium_anthropic::AnthropicClient;
use symposium_core::assistant::{
    AnthropicModel, AssistantSettings, ChatModel, ChatRequest, ModelError,
};
use symposium_core::Assistant;

/// The assistant as held by the server: any model behind the seam.
pub type SharedAssistant = Assistant<Arc<dyn ChatModel>>;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The JSON database
    pub store: Arc<JsonFileStore>,
    /// Registration assistant
    pub assistant: Arc<SharedAssistant>,
    /// Bearer token guarding the admin area, if any
    pub admin_token: Option<Arc<str>>,
    /// Prometheus handle; `None` when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: JsonFileStore, assistant: SharedAssistant) -> Self {
        Self {
            store: Arc::new(store),
            assistant: Arc::new(assistant),
            admin_token: None,
            metrics: None,
        }
    }

    /// Require `token` on admin routes
    #[must_use]
    pub fn with_admin_token(mut self, token: impl Into<Arc<str>>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    /// Serve `/metrics` from `handle`
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Build the state described by `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let settings = AssistantSettings {
            contact_number: config.assistant.contact_number.clone(),
            ..AssistantSettings::default()
        };
        let assistant = Assistant::new(build_model(&config.assistant), settings);

        let state = Self::new(JsonFileStore::new(&config.store.path), assistant);
        match &config.admin.token {
            Some(token) => state.with_admin_token(token.as_str()),
            None => state,
        }
    }
}

/// Pick the model for the configured provider.
///
/// Without an API key the server still starts; every chat turn then fails
/// as unavailable.
#[must_use]
pub fn build_model(config: &AssistantConfig) -> Arc<dyn ChatModel> {
    match &config.api_key {
        Some(key) => {
            let client = AnthropicClient::new(key.clone()).with_api_url(config.api_url.as_str());
            Arc::new(AnthropicModel::new(client, config.model.clone(), config.max_tokens))
        }
        None => {
            tracing::warn!("ANTHROPIC_API_KEY is not set; the chat assistant is unavailable");
            Arc::new(UnconfiguredModel)
        }
    }
}

/// Stand-in model used when no API key is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnconfiguredModel;

#[async_trait]
impl ChatModel for UnconfiguredModel {
    async fn complete(&self, _request: ChatRequest) -> Result<String, ModelError> {
        Err(ModelError::Unavailable("no model API key configured".to_string()))
    }
}
