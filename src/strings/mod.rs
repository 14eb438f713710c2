//! # Strings Module
//!
//! Centralizes user-facing replies and log lines.

pub mod logs;
pub mod messages;
