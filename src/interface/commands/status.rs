//! # Status Command
//!
//! Handles `.status`: scheduler state plus the pending backlog of every known project.

use crate::application::scheduler::SummaryScheduler;
use crate::application::store::MessageStore;
use crate::domain::traits::ChatProvider;
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_status(
    scheduler: &SummaryScheduler,
    store: &MessageStore,
    chat: &impl ChatProvider,
) -> Result<()> {
    let status = scheduler.status();
    let mut lines = vec![messages::status(
        status.running,
        status.interval.as_secs(),
        status.ticks_completed,
    )];

    let pending: Vec<String> = store
        .snapshot()
        .iter()
        .filter(|(_, backlog)| !backlog.is_empty())
        .map(|(project, backlog)| messages::pending_line(project, backlog.len()))
        .collect();

    if pending.is_empty() {
        lines.push(messages::NO_PENDING.to_string());
    } else {
        lines.extend(pending);
    }

    chat.send_message(&lines.join("\n"))
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
