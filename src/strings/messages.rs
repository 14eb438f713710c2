//! # Messages
//!
//! Constant strings and format functions for user-facing replies.

pub const INVALID_COMMAND: &str = "Invalid command.";
pub const PONG: &str = "pong";
pub const PONG_REACTION: &str = "🏓";
pub const HOMEPAGE: &str = "Website in construction 🏗️";

pub fn prefix_reply(prefix: &str) -> String {
    format!("My prefix is: `{prefix}`")
}

pub fn help_listing(prefix: &str, names: &[&str]) -> String {
    let lines: Vec<String> = names.iter().map(|n| format!("- `{prefix}{n}`")).collect();
    format!("**Commands**\n{}", lines.join("\n"))
}

pub fn usage(prefix: &str, command: &str, args: &str) -> String {
    format!("Usage: `{prefix}{command} {args}`")
}

pub fn your_id(id: &str) -> String {
    format!("Your ID: `{id}`")
}

pub fn thread_id(id: &str) -> String {
    format!("Thread ID: `{id}`")
}

pub fn membership_failed(user: &str, err: &str) -> String {
    format!("Failed for `{user}`: {err}")
}
