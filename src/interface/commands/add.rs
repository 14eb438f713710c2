//! # Add Command
//!
//! `add <user> [user...]`: invites users into the current thread.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::registry::{Command, CommandContext, CommandUnit};
use crate::strings::messages;

pub struct Add;

pub fn unit() -> CommandUnit {
    CommandUnit::new(file!(), Add)
}

#[async_trait]
impl Command for Add {
    async fn run(&self, ctx: CommandContext) -> Result<()> {
        let users: Vec<&str> = ctx.args.iter().map(String::as_str).filter(|a| !a.is_empty()).collect();
        if users.is_empty() {
            ctx.interaction
                .reply(&messages::usage(&ctx.prefix, "add", "<user>"))
                .await?;
            return Ok(());
        }

        for user in users {
            if let Err(e) = ctx.interaction.add(user).await {
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
    async fn test_add_each_user() {
        let session = Arc::new(RecordingSession::default());
        Add.run(command_context(session.clone(), &["12345", "", "@bob:x"]))
            .await
            .unwrap();

        assert_eq!(
            session.calls(),
            vec![
                SessionCall::Add {
                    user_id: "12345".into(),
                    thread_id: "!room:x".into(),
                },
                SessionCall::Add {
                    user_id: "@bob:x".into(),
                    thread_id: "!room:x".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_add_without_args_shows_usage() {
        let session = Arc::new(RecordingSession::default());
        Add.run(command_context(session.clone(), &[])).await.unwrap();

        assert_eq!(
            session.calls(),
            vec![SessionCall::Send {
                text: "Usage: `:add <user>`".into(),
                thread_id: "!room:x".into(),
                reply_to: Some("$msg".into()),
            }]
        );
    }
}
