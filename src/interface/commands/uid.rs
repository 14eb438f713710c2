//! # Uid Command
//!
//! Replies with the sender's ID.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::registry::{Command, CommandContext, CommandUnit};

pub struct Uid;

pub fn unit() -> CommandUnit {
    CommandUnit::new(file!(), Uid)
}

#[async_trait]
impl Command for Uid {
    async fn run(&self, ctx: CommandContext) -> Result<()> {
        let reply = crate::strings::messages::your_id(&ctx.event.sender_id);
        ctx.interaction.reply(&reply).await?;
        Ok(())
    }
}
