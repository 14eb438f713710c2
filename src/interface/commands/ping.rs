//! # Ping Command
//!
//! Reacts to the message and replies `pong`.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::registry::{Command, CommandContext, CommandUnit};
use crate::strings::messages;

pub struct Ping;

pub fn unit() -> CommandUnit {
    CommandUnit::new(file!(), Ping)
}

#[async_trait]
impl Command for Ping {
    async fn run(&self, ctx: CommandContext) -> Result<()> {
        if let Err(e) = ctx.interaction.react(messages::PONG_REACTION).await {
            tracing::warn!("Ping reaction failed: {}", e);
        }
        ctx.interaction.reply(messages::PONG).await?;
        Ok(())
    }
}
