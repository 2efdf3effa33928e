//! # Domain Types
//!
//! Common data structures and enums used across the application logic.

use chrono::{DateTime, Utc};

/// Fallback author used when the chat platform delivers a message without a sender.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// A chat message waiting to be summarized. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(author: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            timestamp,
        }
    }
}

/// A message as delivered by the chat platform, before it is accepted.
///
/// Every field may be missing; the intake boundary decides what to tolerate.
#[derive(Debug, Clone, Default)]
pub struct InboundMessage {
    pub author: Option<String>,
    pub text: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub room_id: Option<String>,
}

impl InboundMessage {
    /// Converts into a storable [`Message`].
    ///
    /// Returns `None` when there is no text. A missing author becomes
    /// [`UNKNOWN_AUTHOR`] and a missing timestamp becomes `now`.
    pub fn into_message(self, now: DateTime<Utc>) -> Option<Message> {
        let text = self.text?;
        Some(Message {
            author: self.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            text,
            timestamp: self.timestamp.unwrap_or(now),
        })
    }
}

/// Failures of the external collaborators used by the summary pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// The summarization service failed or answered with a malformed response.
    Summarization { project: String, message: String },
    /// The summary could not be delivered to its destination.
    Publication { destination: String, message: String },
}

impl SummaryError {
    pub fn summarization(project: &str, message: impl Into<String>) -> Self {
        Self::Summarization {
            project: project.to_string(),
            message: message.into(),
        }
    }

    pub fn publication(destination: &str, message: impl Into<String>) -> Self {
        Self::Publication {
            destination: destination.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SummaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryError::Summarization { project, message } => {
                write!(f, "summarization failed for [{}]: {}", project, message)
            }
            SummaryError::Publication {
                destination,
                message,
            } => write!(f, "publication to {} failed: {}", destination, message),
        }
    }
}

impl std::error::Error for SummaryError {}
