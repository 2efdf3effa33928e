//! # Message Store
//!
//! In-memory, per-project append log of messages waiting to be summarized.
//! Shared between the ingestion path and the summary scheduler through `Arc<MessageStore>`.
//!
//! Keys are used exactly as given; normalization is the caller's job.
//! A project log is never removed once created (except by [`MessageStore::reset`]),
//! so a cleared project stays known with zero messages.

use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::domain::types::Message;

#[derive(Debug)]
struct ProjectLog {
    messages: Vec<Message>,
    /// Changes whenever messages are removed from the log.
    epoch: u64,
}

#[derive(Debug, Default)]
struct Inner {
    logs: BTreeMap<String, ProjectLog>,
    next_epoch: u64,
}

fn next_epoch(counter: &mut u64) -> u64 {
    let epoch = *counter;
    *counter += 1;
    epoch
}

/// The messages of one project as seen at a single point in time.
///
/// Handing it back to [`MessageStore::drain`] removes exactly these messages,
/// leaving anything appended after the checkout in place.
#[derive(Debug, Clone)]
pub struct Backlog {
    pub project: String,
    pub messages: Vec<Message>,
    epoch: Option<u64>,
}

impl Backlog {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct MessageStore {
    inner: RwLock<Inner>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the project's log, creating the log on first use.
    pub fn store(&self, project: &str, message: Message) {
        let mut guard = self.inner.write();
        let Inner { logs, next_epoch: counter } = &mut *guard;
        let log = logs.entry(project.to_string()).or_insert_with(|| ProjectLog {
            messages: Vec::new(),
            epoch: next_epoch(counter),
        });
        log.messages.push(message);
        tracing::debug!(
            "Stored message for {:?} ({} pending)",
            project,
            log.messages.len()
        );
    }

    /// Returns a copy of the project's messages in arrival order.
    pub fn get_messages(&self, project: &str) -> Vec<Message> {
        self.inner
            .read()
            .logs
            .get(project)
            .map(|log| log.messages.clone())
            .unwrap_or_default()
    }

    pub fn has_messages(&self, project: &str) -> bool {
        self.message_count(project) > 0
    }

    pub fn message_count(&self, project: &str) -> usize {
        self.inner
            .read()
            .logs
            .get(project)
            .map_or(0, |log| log.messages.len())
    }

    /// Projects with at least one pending message, sorted lexicographically.
    pub fn active_projects(&self) -> Vec<String> {
        self.inner
            .read()
            .logs
            .iter()
            .filter(|(_, log)| !log.messages.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Returns true if the project has ever been stored to (even if it is empty now).
    pub fn is_known(&self, project: &str) -> bool {
        self.inner.read().logs.contains_key(project)
    }

    /// Empties the project's log but keeps the project known. Unknown projects are ignored.
    pub fn clear(&self, project: &str) {
        let mut guard = self.inner.write();
        let Inner { logs, next_epoch: counter } = &mut *guard;
        if let Some(log) = logs.get_mut(project) {
            log.messages.clear();
            log.epoch = next_epoch(counter);
        }
    }

    /// Takes a consistent copy of the project's pending messages for a later [`drain`](Self::drain).
    pub fn checkout(&self, project: &str) -> Backlog {
        let guard = self.inner.read();
        match guard.logs.get(project) {
            Some(log) => Backlog {
                project: project.to_string(),
                messages: log.messages.clone(),
                epoch: Some(log.epoch),
            },
            None => Backlog {
                project: project.to_string(),
                messages: Vec::new(),
                epoch: None,
            },
        }
    }

    /// Removes exactly the messages captured by `backlog` and returns how many were removed.
    ///
    /// Messages stored after the checkout survive. If the log was cleared, reset or
    /// drained since the checkout, nothing is removed: the captured messages are already gone.
    pub fn drain(&self, backlog: &Backlog) -> usize {
        let Some(epoch) = backlog.epoch else {
            return 0;
        };
        if backlog.is_empty() {
            return 0;
        }

        let mut guard = self.inner.write();
        let Inner { logs, next_epoch: counter } = &mut *guard;
        let Some(log) = logs.get_mut(&backlog.project) else {
            return 0;
        };
        if log.epoch != epoch {
            tracing::warn!(
                "Backlog for {:?} changed since checkout, leaving {} message(s) in place",
                backlog.project,
                log.messages.len()
            );
            return 0;
        }

        let removed = backlog.len().min(log.messages.len());
        log.messages.drain(..removed);
        log.epoch = next_epoch(counter);
        removed
    }

    /// Deep copy of every project log, for diagnostics.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<Message>> {
        self.inner
            .read()
            .logs
            .iter()
            .map(|(name, log)| (name.clone(), log.messages.clone()))
            .collect()
    }

    /// Forgets every project. Only for full reinitialization; use [`clear`](Self::clear) per project.
    pub fn reset(&self) {
        self.inner.write().logs.clear();
    }
}
