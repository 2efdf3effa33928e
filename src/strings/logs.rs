pub const STARTING: &str = "Starting Summabies...";

pub fn logged_in(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub fn joining_room(room: &str) -> String {
    format!("Joining room {room}...")
}

pub fn join_room_fail(room: &str, err: &str) -> String {
    format!("Failed to join room {room}: {err}")
}

pub fn join_room_success(room: &str) -> String {
    format!("Joined room {room}.")
}

pub const STARTUP_MESSAGE_SENT: &str = "Startup message sent";

pub fn startup_message_fail(err: &str) -> String {
    format!("Failed to send startup message: {err}")
}

pub fn invite_received(room_id: &str) -> String {
    format!("💌 Received invite for room {room_id:?}")
}

pub fn join_invite_fail(err: &str) -> String {
    format!("Failed to join room after invite: {err}")
}

pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}

pub const SHUTDOWN: &str = "Shutting down...";

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub const CONFIG_PARSE_ERROR: &str = "Failed to parse YAML";

pub fn message_stored(project: &str, author: &str) -> String {
    format!("[RECEIVED] Project: {project}, User: {author}")
}

pub fn scheduler_started(interval_secs: u64) -> String {
    format!("Summary scheduler started - running every {interval_secs}s")
}

pub const SCHEDULER_ALREADY_RUNNING: &str = "Summary scheduler already running";
pub const SCHEDULER_STOPPED: &str = "Summary scheduler stopped";

pub fn tick_started(projects: usize) -> String {
    format!("[TICK] Summarization timer triggered, {projects} active project(s)")
}

pub fn tick_skip(project: &str) -> String {
    format!("[SKIP] No messages for project: {project}")
}

pub fn summary_posted(project: &str, count: usize) -> String {
    format!("[SUMMARY POSTED] Project: {project}, Messages: {count}")
}

pub fn summarization_failed(project: &str, count: usize, err: &str) -> String {
    format!("[ERROR] Summarizing project {project} ({count} messages): {err}")
}

pub fn publication_failed(project: &str, count: usize, err: &str) -> String {
    format!("[ERROR] Posting summary for project {project} ({count} messages): {err}")
}

pub fn generating_summary(project: &str, count: usize) -> String {
    format!("Generating summary for project: {project} with {count} messages")
}
