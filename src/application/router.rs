//! # Command Router
//!
//! Routes inbound events to the registered command handlers. Every event is
//! first passed through the identity bootstrapper, then classified by its
//! body and dispatched with a fresh `Interaction`.

use std::sync::Arc;

use crate::application::identity::IdentityBootstrapper;
use crate::application::interaction::Interaction;
use crate::application::parsing::{Classified, classify};
use crate::application::registry::{CommandContext, CommandRegistry};
use crate::domain::traits::{SessionClient, Store};
use crate::domain::types::InboundEvent;
use crate::strings::messages;

/// Terminal state of one dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A command ran (successfully or not) or the prefix query was answered.
    Handled,
    /// Nothing to do: empty body or ordinary conversation.
    Ignored,
    /// Unknown command; the user was told so.
    Rejected,
    /// Identity bootstrap could not reach storage; event abandoned.
    Failed,
}

pub struct CommandRouter {
    prefix: String,
    registry: Arc<CommandRegistry>,
    identity: IdentityBootstrapper,
    session: Arc<dyn SessionClient>,
}

impl CommandRouter {
    pub fn new(
        prefix: impl Into<String>,
        registry: Arc<CommandRegistry>,
        store: Arc<dyn Store>,
        session: Arc<dyn SessionClient>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            registry,
            identity: IdentityBootstrapper::new(store, session.clone()),
            session,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Processes one event. Never fails: handler errors and panics are logged
    /// here so the listener keeps running.
    pub async fn dispatch(&self, event: InboundEvent) -> Outcome {
        if let Err(e) = self.identity.ensure(&event).await {
            tracing::error!(
                "Identity bootstrap failed for sender='{}' thread='{}': {}",
                event.sender_id,
                event.thread_id,
                e
            );
            return Outcome::Failed;
        }

        let (command, args) = match classify(event.body.as_deref(), &self.prefix) {
            Classified::Empty | Classified::Conversation => return Outcome::Ignored,
            Classified::PrefixQuery => {
                self.reply(&event, &messages::prefix_reply(&self.prefix)).await;
                return Outcome::Handled;
            }
            Classified::Invocation { command, args } => (command.to_string(), args),
        };

        tracing::info!(
            "Router dispatching cmd='{}' args={:?} sender='{}'",
            command,
            args,
            event.sender_id
        );

        let Some(handler) = self.registry.lookup(&command) else {
            self.reply(&event, messages::INVALID_COMMAND).await;
            return Outcome::Rejected;
        };

        let ctx = CommandContext {
            api: self.session.clone(),
            interaction: Interaction::new(self.session.clone(), &event),
            event,
            args,
            prefix: self.prefix.clone(),
            commands: self.registry.names(),
        };

        // A separate task turns a handler panic into a JoinError instead of
        // unwinding through the listener.
        match tokio::spawn(async move { handler.run(ctx).await }).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("Command '{}' failed: {:#}", command, e),
            Err(e) if e.is_panic() => tracing::error!("Command '{}' panicked", command),
            Err(e) => tracing::error!("Command '{}' was cancelled: {}", command, e),
        }

        Outcome::Handled
    }

    async fn reply(&self, event: &InboundEvent, text: &str) {
        if let Err(e) = self
            .session
            .send_message(text, &event.thread_id, Some(&event.message_id))
            .await
        {
            tracing::error!("Failed to reply in {}: {}", event.thread_id, e);
        }
    }
}
