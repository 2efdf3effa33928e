//! # Summary Service
//!
//! Formats a project's backlog into a prompt and asks the configured LLM for a digest.

use async_trait::async_trait;
use chrono::SecondsFormat;
use std::sync::Arc;

use crate::domain::traits::{LlmProvider, Summarizer};
use crate::domain::types::{Message, SummaryError};
use crate::strings::{logs, messages, prompts};

pub struct SummaryService {
    llm: Arc<dyn LlmProvider>,
}

impl SummaryService {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }
}

/// One line per message: `[2024-01-01T09:00:00.000Z] author: text`.
pub fn format_messages(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| {
            format!(
                "[{}] {}: {}",
                m.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                m.author,
                m.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Summarizer for SummaryService {
    async fn generate_summary(
        &self,
        project: &str,
        messages: &[Message],
    ) -> Result<String, SummaryError> {
        if messages.is_empty() {
            return Ok(messages::nothing_to_summarize(project));
        }

        let prompt = prompts::summary_prompt(project, &format_messages(messages));
        tracing::info!("{}", logs::generating_summary(project, messages.len()));

        let summary = self
            .llm
            .completion(&prompt)
            .await
            .map_err(|e| SummaryError::summarization(project, e))?;

        let summary = summary.trim();
        if summary.is_empty() {
            return Err(SummaryError::summarization(
                project,
                "Empty summary in response",
            ));
        }

        tracing::info!("Summary generated successfully for project: {}", project);
        Ok(summary.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;

    struct RecordingLlm {
        prompts: Mutex<Vec<String>>,
        answer: Result<String, String>,
    }

    impl RecordingLlm {
        fn answering(answer: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                answer: answer.map(str::to_string).map_err(str::to_string),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for RecordingLlm {
        async fn completion(&self, prompt: &str) -> Result<String, String> {
            self.prompts.lock().push(prompt.to_string());
            self.answer.clone()
        }
    }

    fn backlog() -> Vec<Message> {
        vec![
            Message::new(
                "@alice:example.org",
                "[Api] login shipped",
                Utc.with_ymd_and_hms(2024, 3, 4, 10, 15, 0).unwrap(),
            ),
            Message::new(
                "@bob:example.org",
                "[Api] reviewing rate limits",
                Utc.with_ymd_and_hms(2024, 3, 4, 10, 20, 30).unwrap(),
            ),
        ]
    }

    #[test]
    fn test_format_messages() {
        assert_eq!(
            format_messages(&backlog()),
            "[2024-03-04T10:15:00.000Z] @alice:example.org: [Api] login shipped\n\
             [2024-03-04T10:20:30.000Z] @bob:example.org: [Api] reviewing rate limits"
        );
    }

    #[tokio::test]
    async fn test_empty_backlog_skips_service() {
        let llm = RecordingLlm::answering(Ok("unused"));
        let service = SummaryService::new(llm.clone());
        let summary = service.generate_summary("Api", &[]).await.unwrap();
        assert_eq!(summary, "No messages found for project Api.");
        assert!(llm.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_summary_uses_prompt_with_messages() {
        let llm = RecordingLlm::answering(Ok("  Login shipped; rate limits in review.\n"));
        let service = SummaryService::new(llm.clone());

        let summary = service.generate_summary("Api", &backlog()).await.unwrap();
        assert_eq!(summary, "Login shipped; rate limits in review.");

        let prompts = llm.prompts.lock();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("project \"Api\""));
        assert!(prompts[0].contains("@bob:example.org: [Api] reviewing rate limits"));
    }

    #[tokio::test]
    async fn test_service_error_is_summarization_failure() {
        let service = SummaryService::new(RecordingLlm::answering(Err("HTTP 503")));
        let err = service.generate_summary("Api", &backlog()).await.unwrap_err();
        assert_eq!(err, SummaryError::summarization("Api", "HTTP 503"));
    }

    #[tokio::test]
    async fn test_blank_answer_is_malformed() {
        let service = SummaryService::new(RecordingLlm::answering(Ok("   ")));
        let err = service.generate_summary("Api", &backlog()).await.unwrap_err();
        assert!(matches!(err, SummaryError::Summarization { .. }));
    }
}
