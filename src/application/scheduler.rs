//! # Summary Scheduler
//!
//! Periodically drains every active project: summarize, publish, then clear.
//!
//! A project's backlog is only removed after both the summary and its publication
//! succeeded. Any failure leaves the backlog in place for the next tick, so delivery
//! is at-least-once. Ticks never overlap: the periodic loop awaits each tick and
//! manual ticks (`.summarize`) share the same tick lock.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::application::store::MessageStore;
use crate::domain::config::DrainMode;
use crate::domain::traits::{ChannelPublisher, Summarizer};
use crate::domain::types::SummaryError;
use crate::strings::{logs, messages};

/// Result of one project's pipeline within a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectOutcome {
    Published { messages: usize },
    Skipped,
    SummarizationFailed(SummaryError),
    PublicationFailed(SummaryError),
}

impl ProjectOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ProjectOutcome::SummarizationFailed(_) | ProjectOutcome::PublicationFailed(_)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Outcomes in processing order (lexicographic by project).
    pub outcomes: Vec<(String, ProjectOutcome)>,
}

impl TickReport {
    pub fn outcome(&self, project: &str) -> Option<&ProjectOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == project)
            .map(|(_, outcome)| outcome)
    }

    pub fn published(&self) -> usize {
        self.count(|o| matches!(o, ProjectOutcome::Published { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(ProjectOutcome::is_failure)
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| *o == ProjectOutcome::Skipped)
    }

    fn count(&self, pred: impl Fn(&ProjectOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerStatus {
    pub running: bool,
    pub interval: Duration,
    pub ticks_completed: u64,
}

struct RunningLoop {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

pub struct SummaryScheduler {
    store: Arc<MessageStore>,
    summarizer: Arc<dyn Summarizer>,
    publisher: Arc<dyn ChannelPublisher>,
    destination: String,
    interval: Duration,
    drain: DrainMode,
    tick_lock: tokio::sync::Mutex<()>,
    ticks_completed: AtomicU64,
    running: Mutex<Option<RunningLoop>>,
}

impl SummaryScheduler {
    pub fn new(
        store: Arc<MessageStore>,
        summarizer: Arc<dyn Summarizer>,
        publisher: Arc<dyn ChannelPublisher>,
        destination: impl Into<String>,
        interval: Duration,
        drain: DrainMode,
    ) -> Self {
        Self {
            store,
            summarizer,
            publisher,
            destination: destination.into(),
            interval,
            drain,
            tick_lock: tokio::sync::Mutex::new(()),
            ticks_completed: AtomicU64::new(0),
            running: Mutex::new(None),
        }
    }

    /// Starts periodic ticking. Returns `false` if the loop was already running.
    ///
    /// The first tick fires one interval after the start.
    pub fn start(self: &Arc<Self>) -> bool {
        let mut running = self.running.lock();
        if running.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            tracing::warn!("{}", logs::SCHEDULER_ALREADY_RUNNING);
            return false;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let scheduler = Arc::clone(self);
        let handle = tokio::spawn(async move { scheduler.run_loop(stop_rx).await });
        *running = Some(RunningLoop { stop_tx, handle });

        tracing::info!("{}", logs::scheduler_started(self.interval.as_secs()));
        true
    }

    /// Prevents future ticks. A tick that is already running finishes normally.
    /// Returns `false` if the scheduler was not running.
    pub fn stop(&self) -> bool {
        self.take_loop().is_some()
    }

    /// Like [`stop`](Self::stop), but waits for an in-flight tick to complete.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.take_loop()
            && let Err(e) = handle.await
        {
            tracing::error!("Summary scheduler task failed: {}", e);
        }
    }

    fn take_loop(&self) -> Option<JoinHandle<()>> {
        let running = self.running.lock().take()?;
        let _ = running.stop_tx.send(true);
        tracing::info!("{}", logs::SCHEDULER_STOPPED);
        Some(running.handle)
    }

    pub fn status(&self) -> SchedulerStatus {
        SchedulerStatus {
            running: self
                .running
                .lock()
                .as_ref()
                .is_some_and(|r| !r.handle.is_finished()),
            interval: self.interval,
            ticks_completed: self.ticks_completed.load(Ordering::Relaxed),
        }
    }

    async fn run_loop(self: Arc<Self>, mut stop_rx: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                changed = stop_rx.changed() => {
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }
                _ = interval.tick() => {
                    self.run_tick().await;
                }
            }
        }
    }

    /// Runs the pipeline once for every project that has pending messages.
    pub async fn run_tick(&self) -> TickReport {
        let _tick = self.tick_lock.lock().await;

        let projects = self.store.active_projects();
        tracing::info!("{}", logs::tick_started(projects.len()));

        let mut report = TickReport::default();
        for project in projects {
            let outcome = self.process_project(&project).await;
            report.outcomes.push((project, outcome));
        }

        self.ticks_completed.fetch_add(1, Ordering::Relaxed);
        report
    }

    async fn process_project(&self, project: &str) -> ProjectOutcome {
        let backlog = self.store.checkout(project);
        if backlog.is_empty() {
            tracing::info!("{}", logs::tick_skip(project));
            return ProjectOutcome::Skipped;
        }
        let count = backlog.len();

        let summary = match self
            .summarizer
            .generate_summary(project, &backlog.messages)
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(
                    "{}",
                    logs::summarization_failed(project, count, &e.to_string())
                );
                return ProjectOutcome::SummarizationFailed(e);
            }
        };

        let text = messages::summary_header(project, &summary);
        if let Err(e) = self.publisher.publish(&self.destination, &text).await {
            tracing::error!(
                "{}",
                logs::publication_failed(project, count, &e.to_string())
            );
            return ProjectOutcome::PublicationFailed(e);
        }

        match self.drain {
            DrainMode::Precise => {
                self.store.drain(&backlog);
            }
            DrainMode::Full => self.store.clear(project),
        }

        tracing::info!("{}", logs::summary_posted(project, count));
        ProjectOutcome::Published { messages: count }
    }
}
