//! # Message Intake
//!
//! Turns an inbound chat message into store entries: one per project tag.
//! Tags are normalized here, before they become store keys, so `[Backend  API]`
//! and `[ Backend API ]` land in the same project.

use chrono::Utc;
use std::sync::Arc;

use crate::application::extractor::{extract_projects, normalize_project_name};
use crate::application::store::MessageStore;
use crate::domain::types::InboundMessage;
use crate::strings::logs;

pub struct Ingestor {
    store: Arc<MessageStore>,
}

impl Ingestor {
    pub fn new(store: Arc<MessageStore>) -> Self {
        Self { store }
    }

    /// Stores the message under every tagged project and returns those projects in tag order.
    /// Untagged messages and messages without text are ignored.
    pub fn ingest(&self, inbound: InboundMessage) -> Vec<String> {
        let projects: Vec<String> = match inbound.text.as_deref() {
            Some(text) => extract_projects(text)
                .iter()
                .map(|tag| normalize_project_name(tag))
                .collect(),
            None => return Vec::new(),
        };
        if projects.is_empty() {
            return projects;
        }

        let Some(message) = inbound.into_message(Utc::now()) else {
            return Vec::new();
        };
        for project in &projects {
            self.store.store(project, message.clone());
            tracing::info!("{}", logs::message_stored(project, &message.author));
        }
        projects
    }
}
