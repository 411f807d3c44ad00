//! Configuration management for the symposium site.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Values that fail to parse fall back to the default rather than aborting
//! startup.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use symposium_anthropic::{DEFAULT_API_URL, DEFAULT_MODEL};
use symposium_core::assistant::DEFAULT_CONTACT_NUMBER;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// JSON file store configuration
    pub store: StoreConfig,
    /// Registration assistant configuration
    pub assistant: AssistantConfig,
    /// Admin area configuration
    pub admin: AdminConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON database file
    pub path: PathBuf,
}

/// Assistant configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Model provider API key; chat is unavailable without it
    pub api_key: Option<String>,
    /// Base URL of the Messages API
    pub api_url: String,
    /// Model identifier
    pub model: String,
    /// Maximum tokens per reply
    pub max_tokens: u32,
    /// Phone number offered when the assistant cannot help
    pub contact_number: String,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("contact_number", &self.contact_number)
            .finish()
    }
}

/// Admin configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Bearer token required by `/api/admin/*`. `None` leaves the admin area open.
    pub token: Option<String>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8080),
                shutdown_timeout: env::var("SHUTDOWN_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            },
            store: StoreConfig {
                path: env::var("DATA_FILE")
                    .map_or_else(|_| PathBuf::from("data/db.json"), PathBuf::from),
            },
            assistant: AssistantConfig {
                api_key: non_empty_var("ANTHROPIC_API_KEY"),
                api_url: env::var("ANTHROPIC_API_URL")
                    .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
                model: env::var("ASSISTANT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                max_tokens: env::var("ASSISTANT_MAX_TOKENS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1024),
                contact_number: env::var("CONTACT_NUMBER")
                    .unwrap_or_else(|_| DEFAULT_CONTACT_NUMBER.to_string()),
            },
            admin: AdminConfig {
                token: non_empty_var("ADMIN_TOKEN"),
            },
        }
    }

    /// `host:port` to bind the listener to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
