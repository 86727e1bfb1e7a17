//! Remote completion client, prompt copy, and the coach chat session
//!
//! Every AI feature goes through one endpoint: POST a message list, get
//! back `{"completion": "..."}`. Call sites never surface transport
//! errors to the user; each one has its own fallback copy instead.

pub mod client;
pub mod coach;
pub mod prompts;

pub use client::{ChatMessage, ChatRole, CompletionClient, HttpCompletionClient};
pub use coach::CoachSession;
