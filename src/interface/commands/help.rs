//! # Help Command
//!
//! Lists every registered command with the configured prefix.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::registry::{Command, CommandContext, CommandUnit};

pub struct Help;

pub fn unit() -> CommandUnit {
    CommandUnit::new(file!(), Help)
}

#[async_trait]
impl Command for Help {
    async fn run(&self, ctx: CommandContext) -> Result<()> {
        let names: Vec<&str> = ctx.commands.iter().map(String::as_str).collect();
        let listing = crate::strings::messages::help_listing(&ctx.prefix, &names);
        ctx.interaction.send(&listing).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSession, SessionCall, command_context};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_help_lists_commands() {
        let session = Arc::new(RecordingSession::default());
        Help.run(command_context(session.clone(), &[])).await.unwrap();

        assert_eq!(
            session.calls(),
            vec![SessionCall::Send {
                text: "**Commands**\n- `:add`\n- `:ping`".into(),
                thread_id: "!room:x".into(),
                reply_to: None,
            }]
        );
    }
}
