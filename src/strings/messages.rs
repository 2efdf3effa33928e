//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.

pub const STARTUP: &str =
    "🚀 Summabies is now online and monitoring for project messages! Tag a message with `[Project]` to include it in the next summary.";
pub const UNKNOWN_COMMAND: &str = "❓ Unknown command. Try `.help`.";
pub const NO_PENDING: &str = "No pending project messages.";

pub fn summary_header(project: &str, summary: &str) -> String {
    format!("**Summary for [{project}]**\n{summary}")
}

pub fn nothing_to_summarize(project: &str) -> String {
    format!("No messages found for project {project}.")
}

pub fn status(running: bool, interval_secs: u64, ticks: u64) -> String {
    let state = if running { "🟢 running" } else { "🔴 stopped" };
    format!("**Scheduler**: {state} (every {interval_secs}s, {ticks} tick(s) completed)")
}

pub fn pending_line(project: &str, count: usize) -> String {
    format!("* [{project}]: {count} message(s)")
}

pub fn tick_result(published: usize, failed: usize, skipped: usize) -> String {
    format!("✅ Summarized {published} project(s), {failed} failed, {skipped} skipped.")
}
