//! # Application Layer
//!
//! Contains the core business logic and orchestration of the bot.
//! This includes project extraction, the message store, summarization, scheduling and command routing.

pub mod extractor;
pub mod ingest;
pub mod router;
pub mod scheduler;
pub mod store;
pub mod summarizer;
