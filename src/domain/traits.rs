//! # Domain Traits
//!
//! Abstract interfaces for the collaborators the dispatch core talks to
//! (session client, storage). Implementations live in the Infrastructure layer.

use async_trait::async_trait;

use crate::domain::error::{SessionError, StoreError};
use crate::domain::types::{ThreadProfile, ThreadRecord, UserProfile, UserRecord};

/// The raw messaging-session primitives (e.g. Matrix).
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// Send a message to a thread, optionally quoting `reply_to`.
    async fn send_message(
        &self,
        text: &str,
        thread_id: &str,
        reply_to: Option<&str>,
    ) -> Result<(), SessionError>;

    /// React to a message in a thread.
    async fn set_reaction(
        &self,
        emoji: &str,
        message_id: &str,
        thread_id: &str,
    ) -> Result<(), SessionError>;

    async fn add_user_to_group(&self, user_id: &str, thread_id: &str) -> Result<(), SessionError>;

    async fn remove_user_from_group(
        &self,
        user_id: &str,
        thread_id: &str,
    ) -> Result<(), SessionError>;

    /// Profile metadata used when a sender is seen for the first time.
    async fn user_profile(&self, user_id: &str, thread_id: &str) -> Result<UserProfile, SessionError>;

    /// Thread metadata used when a thread is seen for the first time.
    async fn thread_profile(&self, thread_id: &str) -> Result<ThreadProfile, SessionError>;
}

/// Persistent storage of identity records.
///
/// `add_*` must be idempotent: inserting an id that already exists keeps the
/// stored record and returns `Ok(false)`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;
    async fn add_user(&self, record: UserRecord) -> Result<bool, StoreError>;
    async fn get_thread(&self, id: &str) -> Result<Option<ThreadRecord>, StoreError>;
    async fn add_thread(&self, record: ThreadRecord) -> Result<bool, StoreError>;
}
