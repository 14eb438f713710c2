//! # Domain Errors
//!
//! Typed failures surfaced at the collaborator seams. Application edges wrap
//! these in `anyhow` when they only need to report them.

use thiserror::Error;

/// Failure of a session client primitive (send, react, membership, lookups).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown thread: {0}")]
    UnknownThread(String),
    #[error("invalid identifier `{id}`: {reason}")]
    InvalidId { id: String, reason: String },
    #[error("session request failed: {0}")]
    Request(String),
}

/// Failure of the storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Startup failure while building the command registry.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("command unit `{0}` has no usable name")]
    EmptyName(String),
    #[error("command unit `{unit}` derives invalid name `{name}`")]
    InvalidName { unit: String, name: String },
    #[error("command `{0}` is registered more than once")]
    Duplicate(String),
}
