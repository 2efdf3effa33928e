//! # Command Router
//!
//! Routes incoming room messages: `.commands` go to the handlers in `interface/commands`,
//! everything else goes to the intake, which files tagged messages under their projects.

use anyhow::Result;
use std::sync::Arc;

use crate::application::ingest::Ingestor;
use crate::application::scheduler::SummaryScheduler;
use crate::application::store::MessageStore;
use crate::domain::traits::ChatProvider;
use crate::domain::types::InboundMessage;
use crate::interface::commands;
use crate::strings::messages;

pub struct CommandRouter {
    ingestor: Ingestor,
    store: Arc<MessageStore>,
    scheduler: Arc<SummaryScheduler>,
}

/// `.word` with only ASCII letters; anything else (like `...`) is ordinary chat.
fn looks_like_command(cmd: &str) -> bool {
    cmd.strip_prefix('.')
        .is_some_and(|name| !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic()))
}

impl CommandRouter {
    pub fn new(store: Arc<MessageStore>, scheduler: Arc<SummaryScheduler>) -> Self {
        Self {
            ingestor: Ingestor::new(store.clone()),
            store,
            scheduler,
        }
    }

    pub async fn route<C>(&self, chat: &C, inbound: InboundMessage) -> Result<()>
    where
        C: ChatProvider,
    {
        let msg = inbound.text.as_deref().unwrap_or_default().trim();
        let cmd = msg.split_whitespace().next().unwrap_or_default();

        if !looks_like_command(cmd) {
            self.ingestor.ingest(inbound);
            return Ok(());
        }

        tracing::info!(
            "Router dispatching cmd='{}' sender='{}'",
            cmd,
            inbound.author.as_deref().unwrap_or_default()
        );

        match cmd {
            ".help" => commands::help::handle_help(chat).await,
            ".status" => commands::status::handle_status(&self.scheduler, &self.store, chat).await,
            ".summarize" => commands::summarize::handle_summarize(&self.scheduler, chat).await,
            _ => {
                chat.send_message(messages::UNKNOWN_COMMAND)
                    .await
                    .map_err(|e| anyhow::anyhow!(e))?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::DrainMode;
    use crate::domain::traits::{ChannelPublisher, Summarizer};
    use crate::domain::types::{Message, SummaryError};
    use async_trait::async_trait;
    use chrono::Utc;
    use parking_lot::Mutex;
    use std::time::Duration;

    const ROOM: &str = "!ops:example.org";

    #[derive(Default)]
    struct FakeChat {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatProvider for FakeChat {
        async fn send_message(&self, content: &str) -> Result<String, String> {
            let mut sent = self.sent.lock();
            sent.push(content.to_string());
            Ok(format!("$event{}", sent.len()))
        }

        fn room_id(&self) -> String {
            ROOM.to_string()
        }
    }

    struct EchoSummarizer;

    #[async_trait]
    impl Summarizer for EchoSummarizer {
        async fn generate_summary(
            &self,
            project: &str,
            messages: &[Message],
        ) -> Result<String, SummaryError> {
            Ok(format!("{} had {} message(s)", project, messages.len()))
        }
    }

    #[derive(Default)]
    struct CountingPublisher {
        published: Mutex<usize>,
    }

    #[async_trait]
    impl ChannelPublisher for CountingPublisher {
        async fn publish(&self, _destination: &str, _text: &str) -> Result<(), SummaryError> {
            *self.published.lock() += 1;
            Ok(())
        }
    }

    fn router() -> (CommandRouter, Arc<MessageStore>, Arc<CountingPublisher>) {
        let store = Arc::new(MessageStore::new());
        let publisher = Arc::new(CountingPublisher::default());
        let scheduler = Arc::new(SummaryScheduler::new(
            store.clone(),
            Arc::new(EchoSummarizer),
            publisher.clone(),
            ROOM,
            Duration::from_secs(60),
            DrainMode::Precise,
        ));
        (CommandRouter::new(store.clone(), scheduler), store, publisher)
    }

    fn text(body: &str) -> InboundMessage {
        InboundMessage {
            author: Some("@alice:example.org".to_string()),
            text: Some(body.to_string()),
            timestamp: Some(Utc::now()),
            room_id: Some(ROOM.to_string()),
        }
    }

    #[test]
    fn test_looks_like_command() {
        assert!(looks_like_command(".status"));
        assert!(!looks_like_command("..."));
        assert!(!looks_like_command("."));
        assert!(!looks_like_command("[Api]"));
        assert!(!looks_like_command(".5"));
    }

    #[tokio::test]
    async fn test_tagged_message_is_ingested() {
        let (router, store, _) = router();
        let chat = FakeChat::default();
        router.route(&chat, text("[Api] deployed")).await.unwrap();
        assert_eq!(store.message_count("Api"), 1);
        assert!(chat.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_ellipsis_is_not_a_command() {
        let (router, store, _) = router();
        let chat = FakeChat::default();
        router.route(&chat, text("... [Api] anyway")).await.unwrap();
        assert_eq!(store.message_count("Api"), 1);
        assert!(chat.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_status_lists_pending_projects() {
        let (router, store, _) = router();
        store.store("Web", Message::new("bob", "[Web] x", Utc::now()));
        store.store("Api", Message::new("bob", "[Api] y", Utc::now()));
        store.store("Api", Message::new("bob", "[Api] z", Utc::now()));
        let chat = FakeChat::default();

        router.route(&chat, text(".status")).await.unwrap();
        let sent = chat.sent.lock();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("stopped"));
        assert!(sent[0].contains("* [Api]: 2 message(s)\n* [Web]: 1 message(s)"));
    }

    #[tokio::test]
    async fn test_status_without_backlog() {
        let (router, _, _) = router();
        let chat = FakeChat::default();
        router.route(&chat, text(".status")).await.unwrap();
        assert!(chat.sent.lock()[0].ends_with(messages::NO_PENDING));
    }

    #[tokio::test]
    async fn test_summarize_runs_a_tick() {
        let (router, store, publisher) = router();
        store.store("Api", Message::new("bob", "[Api] y", Utc::now()));
        let chat = FakeChat::default();

        router.route(&chat, text(".summarize")).await.unwrap();
        assert_eq!(*publisher.published.lock(), 1);
        assert!(!store.has_messages("Api"));
        assert_eq!(
            chat.sent.lock().as_slice(),
            ["✅ Summarized 1 project(s), 0 failed, 0 skipped."]
        );
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let (router, store, _) = router();
        let chat = FakeChat::default();
        router.route(&chat, text(".frobnicate [Api]")).await.unwrap();
        assert_eq!(chat.sent.lock().as_slice(), [messages::UNKNOWN_COMMAND]);
        assert!(!store.is_known("Api"));
    }

    #[tokio::test]
    async fn test_help() {
        let (router, _, _) = router();
        let chat = FakeChat::default();
        router.route(&chat, text(".help")).await.unwrap();
        assert!(chat.sent.lock()[0].contains(".summarize"));
    }
}
