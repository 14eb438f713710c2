//! # Domain Types
//!
//! Data structures shared by the dispatch core: inbound events, persisted
//! identity records and the profile metadata used to build them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One inbound message occurrence from the messaging session.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub sender_id: String,
    pub thread_id: String,
    pub message_id: String,
    pub body: Option<String>,
    /// Platform-specific fields, passed through untouched.
    pub metadata: serde_json::Value,
}

impl InboundEvent {
    pub fn new(
        sender_id: impl Into<String>,
        thread_id: impl Into<String>,
        message_id: impl Into<String>,
        body: Option<String>,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            thread_id: thread_id.into(),
            message_id: message_id.into(),
            body,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Persisted identity of a sender, created on the first event seen from them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub first_seen: DateTime<Utc>,
}

/// Persisted identity of a conversation thread (a Matrix room).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub member_count: u64,
    pub first_seen: DateTime<Utc>,
}

/// Profile metadata the session client can report about a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub display_name: Option<String>,
}

/// Metadata the session client can report about a thread.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadProfile {
    pub name: Option<String>,
    pub member_count: u64,
}

impl UserRecord {
    pub fn from_profile(id: &str, profile: UserProfile) -> Self {
        Self {
            id: id.to_string(),
            name: profile.display_name,
            first_seen: Utc::now(),
        }
    }
}

impl ThreadRecord {
    pub fn from_profile(id: &str, profile: ThreadProfile) -> Self {
        Self {
            id: id.to_string(),
            name: profile.name,
            member_count: profile.member_count,
            first_seen: Utc::now(),
        }
    }
}
