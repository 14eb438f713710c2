//! # Interaction Facade
//!
//! The per-event "box" handed to command handlers. It closes over the
//! triggering event's thread and message, and exposes only reply, react,
//! send and membership actions.

use std::sync::Arc;

use crate::domain::error::SessionError;
use crate::domain::traits::SessionClient;
use crate::domain::types::InboundEvent;

pub struct Interaction {
    session: Arc<dyn SessionClient>,
    thread_id: String,
    message_id: String,
}

impl Interaction {
    pub fn new(session: Arc<dyn SessionClient>, event: &InboundEvent) -> Self {
        Self {
            session,
            thread_id: event.thread_id.clone(),
            message_id: event.message_id.clone(),
        }
    }

    /// React to the triggering message.
    pub async fn react(&self, emoji: &str) -> Result<(), SessionError> {
        self.session
            .set_reaction(emoji, &self.message_id, &self.thread_id)
            .await
    }

    /// Send `message` to the thread, quoting the triggering message.
    pub async fn reply(&self, message: &str) -> Result<(), SessionError> {
        self.session
            .send_message(message, &self.thread_id, Some(&self.message_id))
            .await
    }

    /// Send `message` to the thread without quoting.
    pub async fn send(&self, message: &str) -> Result<(), SessionError> {
        self.session.send_message(message, &self.thread_id, None).await
    }

    pub async fn add(&self, user_id: &str) -> Result<(), SessionError> {
        self.session.add_user_to_group(user_id, &self.thread_id).await
    }

    pub async fn kick(&self, user_id: &str) -> Result<(), SessionError> {
        self.session
            .remove_user_from_group(user_id, &self.thread_id)
            .await
    }
}
