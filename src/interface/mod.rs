//! # Interface Layer
//!
//! User-facing entry points: chat command handlers invoked by the router.

pub mod commands;
