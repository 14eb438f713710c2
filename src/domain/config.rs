//! # Configuration
//!
//! Loads and parses the application's configuration file (`config.yaml`).
//! Defines the structs for the Matrix service and bot settings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

/// Configuration for connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub homeserver: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Dispatch and process settings.
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// `owner/name` of the GitHub repository checked for new releases.
    #[serde(default)]
    pub update_repo: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            port: default_port(),
            data_dir: default_data_dir(),
            update_repo: None,
        }
    }
}

fn default_prefix() -> String {
    ":".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        if config.bot.prefix.is_empty() {
            anyhow::bail!("bot.prefix must not be empty");
        }
        Ok(config)
    }

    /// `PORT` from the environment wins over the configured port.
    pub fn http_port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(self.bot.port)
    }

    pub fn store_path(&self) -> PathBuf {
        self.bot.data_dir.join("database.json")
    }

    pub fn session_path(&self) -> PathBuf {
        self.bot.data_dir.join("appstate.json")
    }
}
