//! # Tid Command
//!
//! Replies with the current thread's ID, sent through the raw session client
//! to show handlers may use `api` directly.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::registry::{Command, CommandContext, CommandUnit};

pub struct Tid;

pub fn unit() -> CommandUnit {
    CommandUnit::new(file!(), Tid)
}

#[async_trait]
impl Command for Tid {
    async fn run(&self, ctx: CommandContext) -> Result<()> {
        let reply = crate::strings::messages::thread_id(&ctx.event.thread_id);
        ctx.api
            .send_message(&reply, &ctx.event.thread_id, Some(&ctx.event.message_id))
            .await?;
        Ok(())
    }
}
