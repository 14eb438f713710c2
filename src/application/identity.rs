//! # Identity Bootstrapper
//!
//! Makes sure every sender and every thread has a persisted record before the
//! router looks at the message. Safe to run on every event.

use std::sync::Arc;

use crate::domain::error::StoreError;
use crate::domain::traits::{SessionClient, Store};
use crate::domain::types::{InboundEvent, ThreadRecord, UserRecord};

pub struct IdentityBootstrapper {
    store: Arc<dyn Store>,
    session: Arc<dyn SessionClient>,
}

impl IdentityBootstrapper {
    pub fn new(store: Arc<dyn Store>, session: Arc<dyn SessionClient>) -> Self {
        Self { store, session }
    }

    /// Registers the event's sender and thread if either is new.
    pub async fn ensure(&self, event: &InboundEvent) -> Result<(), StoreError> {
        self.ensure_user(&event.sender_id, &event.thread_id).await?;
        self.ensure_thread(&event.thread_id).await?;
        Ok(())
    }

    /// Returns `true` when a record was created.
    pub async fn ensure_user(&self, sender_id: &str, thread_id: &str) -> Result<bool, StoreError> {
        if self.store.get_user(sender_id).await?.is_some() {
            return Ok(false);
        }

        let profile = self
            .session
            .user_profile(sender_id, thread_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Profile lookup for {} failed: {}", sender_id, e);
                Default::default()
            });

        let created = self
            .store
            .add_user(UserRecord::from_profile(sender_id, profile))
            .await?;
        if created {
            tracing::info!("Registered new user {}", sender_id);
        }
        Ok(created)
    }

    /// Returns `true` when a record was created.
    pub async fn ensure_thread(&self, thread_id: &str) -> Result<bool, StoreError> {
        if self.store.get_thread(thread_id).await?.is_some() {
            return Ok(false);
        }

        let profile = self
            .session
            .thread_profile(thread_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Thread lookup for {} failed: {}", thread_id, e);
                Default::default()
            });

        let created = self
            .store
            .add_thread(ThreadRecord::from_profile(thread_id, profile))
            .await?;
        if created {
            tracing::info!("Registered new thread {}", thread_id);
        }
        Ok(created)
    }
}
