//! # Command Handlers
//!
//! Contains specific handler functions for each supported command (e.g., .status, .summarize).
//! These handlers are invoked by the Router.

pub mod help;
pub mod status;
pub mod summarize;
