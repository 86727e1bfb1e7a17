//! Remote text completion client
//!
//! Thin HTTP client for the completion endpoint. The [`CompletionClient`]
//! trait is the seam tests use to script responses without a network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CompletionError;

// ============================================================================
// Chat Messages
// ============================================================================

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    completion: String,
}

// ============================================================================
// Client
// ============================================================================

/// Text completion backend
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a conversation and return the completion text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

/// [`CompletionClient`] talking to the real endpoint over HTTPS
pub struct HttpCompletionClient {
    client: Client,
    endpoint: String,
}

impl HttpCompletionClient {
    /// Per-request timeout; completions that take longer fall back
    const TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(endpoint: impl Into<String>) -> Result<Self, CompletionError> {
        let client = Client::builder().timeout(Self::TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        debug!("Requesting completion with {} messages", messages.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&CompletionRequest { messages })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Completion endpoint returned {}: {}", status.as_u16(), body);
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: CompletionResponse = serde_json::from_str(&body)?;
        debug!("Received completion ({} chars)", parsed.completion.len());
        Ok(parsed.completion)
    }
}
