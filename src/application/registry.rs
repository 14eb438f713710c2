//! # Command Registry
//!
//! Maps command names to their handlers. Built once at startup from a
//! registration table and read-only afterwards.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::application::interaction::Interaction;
use crate::domain::error::RegistryError;
use crate::domain::traits::SessionClient;
use crate::domain::types::InboundEvent;

/// Everything a handler receives for one invocation.
pub struct CommandContext {
    pub api: Arc<dyn SessionClient>,
    pub event: InboundEvent,
    pub args: Vec<String>,
    pub interaction: Interaction,
    /// Configured prefix, for usage messages.
    pub prefix: String,
    /// Every registered name, sorted.
    pub commands: Arc<[String]>,
}

/// The single interface every command implements.
#[async_trait]
pub trait Command: Send + Sync {
    async fn run(&self, ctx: CommandContext) -> Result<()>;
}

/// One loadable command. The registry key is the file stem of `source`.
pub struct CommandUnit {
    pub source: &'static str,
    pub command: Arc<dyn Command>,
}

impl CommandUnit {
    pub fn new(source: &'static str, command: impl Command + 'static) -> Self {
        Self {
            source,
            command: Arc::new(command),
        }
    }

    fn name(&self) -> Result<String, RegistryError> {
        let stem = Path::new(self.source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if stem.is_empty() {
            return Err(RegistryError::EmptyName(self.source.to_string()));
        }
        if stem.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidName {
                unit: self.source.to_string(),
                name: stem.to_string(),
            });
        }
        Ok(stem.to_string())
    }
}

pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
    names: Arc<[String]>,
}

impl CommandRegistry {
    /// Builds the registry. Any malformed unit fails the whole load.
    pub fn load(units: Vec<CommandUnit>) -> Result<Self, RegistryError> {
        let mut commands = HashMap::with_capacity(units.len());

        for unit in units {
            let start = Instant::now();
            let name = unit.name()?;
            if commands.contains_key(&name) {
                return Err(RegistryError::Duplicate(name));
            }
            commands.insert(name.clone(), unit.command);
            tracing::info!(
                "{}",
                crate::strings::logs::command_loaded(&name, start.elapsed().as_millis())
            );
        }

        let mut names: Vec<String> = commands.keys().cloned().collect();
        names.sort();

        Ok(Self {
            commands,
            names: names.into(),
        })
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    pub fn names(&self) -> Arc<[String]> {
        self.names.clone()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
