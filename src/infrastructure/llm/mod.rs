//! Simple LLM API wrapper for OpenAI-compatible providers
//!
//! Used by the summary service to turn a project's backlog into a digest.
//! Every supported provider (OpenAI, Perplexity, Groq, xAI) speaks the
//! `chat/completions` dialect, so a single HTTP implementation serves them all.

mod client;
pub mod providers;
mod types;

pub use client::Client;

pub use types::{Context, Error, Provider, Response, TokenUsage};
