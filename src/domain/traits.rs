//! # Domain Traits
//!
//! Abstract interfaces for core system components (Chat, LLM, Summaries).
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;

use crate::domain::types::{Message, SummaryError};

/// Abstract interface for a Chat Provider bound to one room (e.g., Matrix)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// Delivers text to a destination (room / channel id).
#[async_trait]
pub trait ChannelPublisher: Send + Sync {
    async fn publish(&self, destination: &str, text: &str) -> Result<(), SummaryError>;
}

/// Abstract interface for an LLM Provider
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a single user prompt
    async fn completion(&self, prompt: &str) -> Result<String, String>;
}

/// Turns a batch of project messages into a text summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn generate_summary(
        &self,
        project: &str,
        messages: &[Message],
    ) -> Result<String, SummaryError>;
}
