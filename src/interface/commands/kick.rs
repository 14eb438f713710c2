//! # Kick Command
//!
//! `kick <user> [user...]`: removes users from the current thread.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::registry::{Command, CommandContext, CommandUnit};
use crate::strings::messages;

pub struct Kick;

pub fn unit() -> CommandUnit {
    CommandUnit::new(file!(), Kick)
}

#[async_trait]
impl Command for Kick {
    async fn run(&self, ctx: CommandContext) -> Result<()> {
        let users: Vec<&str> = ctx.args.iter().map(String::as_str).filter(|a| !a.is_empty()).collect();
        if users.is_empty() {
            ctx.interaction
                .reply(&messages::usage(&ctx.prefix, "kick", "<user>"))
                .await?;
            return Ok(());
        }

        for user in users {
            if let Err(e) = ctx.interaction.kick(user).await {
                ctx.interaction
                    .reply(&messages::membership_failed(user, &e.to_string()))
                    .await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSession, SessionCall, command_context};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_kick_user() {
        let session = Arc::new(RecordingSession::default());
        Kick.run(command_context(session.clone(), &["@eve:x"]))
            .await
            .unwrap();

        assert_eq!(
            session.calls(),
            vec![SessionCall::Kick {
                user_id: "@eve:x".into(),
                thread_id: "!room:x".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_failed_kick_propagates_when_reply_fails() {
        let session = Arc::new(RecordingSession::failing());
        assert!(Kick.run(command_context(session, &["@eve:x"])).await.is_err());
    }
}
