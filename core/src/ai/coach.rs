//! Wellness coach chat session
//!
//! Holds the running conversation and builds each request as: a fresh
//! system prompt with today's wellness data, the last few prior turns,
//! then the new user message. A failed completion still produces an
//! assistant turn, using the fallback copy, so the conversation never
//! dead-ends.

use std::sync::Arc;

use tracing::warn;
use wellness_companion_shared::{DailyMetrics, MoodType};

use super::client::{ChatMessage, CompletionClient};
use super::prompts;

/// One in-memory coaching conversation
pub struct CoachSession {
    client: Arc<dyn CompletionClient>,
    history: Vec<ChatMessage>,
}

impl CoachSession {
    /// Prior messages included as context in each request
    const CONTEXT_MESSAGES: usize = 5;

    /// Start a session, seeded with the coach's greeting
    pub fn new(client: Arc<dyn CompletionClient>, mood: Option<MoodType>) -> Self {
        let history = vec![ChatMessage::assistant(prompts::coach_welcome(mood))];
        Self { client, history }
    }

    /// Send one user message and return the assistant reply
    ///
    /// Blank input is ignored and returns `None`. On completion failure
    /// the reply is [`prompts::COACH_FALLBACK`]; either way both turns
    /// are appended to the session history.
    pub async fn send(
        &mut self,
        text: &str,
        mood: Option<MoodType>,
        metrics: &DailyMetrics,
    ) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut messages = vec![prompts::coach_system(mood, metrics)];
        let start = self.history.len().saturating_sub(Self::CONTEXT_MESSAGES);
        messages.extend_from_slice(&self.history[start..]);
        messages.push(ChatMessage::user(text));

        let reply = match self.client.complete(&messages).await {
            Ok(completion) => completion,
            Err(e) => {
                warn!("Coach completion failed: {e}");
                prompts::COACH_FALLBACK.to_string()
            }
        };

        self.history.push(ChatMessage::user(text));
        self.history.push(ChatMessage::assistant(reply.clone()));
        Some(reply)
    }

    /// Full conversation, greeting included
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}
