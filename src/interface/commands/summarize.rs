//! # Summarize Command
//!
//! Handles `.summarize`: runs a tick immediately instead of waiting for the timer.
//! Waits for a periodic tick that is already running.

use crate::application::scheduler::SummaryScheduler;
use crate::domain::traits::ChatProvider;
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_summarize(scheduler: &SummaryScheduler, chat: &impl ChatProvider) -> Result<()> {
    let report = scheduler.run_tick().await;
    if report.outcomes.is_empty() {
        chat.send_message(messages::NO_PENDING)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let msg = messages::tick_result(report.published(), report.failed(), report.skipped());
    chat.send_message(&msg).await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
