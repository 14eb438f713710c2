//! # Main Entry Point
//!
//! Wires the dispatch core together:
//! - Domain: configuration, types, collaborator traits
//! - Infrastructure: Matrix session, JSON store, keep-alive HTTP, update check
//! - Application: registry, identity bootstrap, router
//! - Interface: built-in command handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::registry::CommandRegistry;
use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::infrastructure::matrix::MatrixService;
use crate::infrastructure::store::JsonStore;
use crate::infrastructure::updates::UpdateChecker;
use crate::strings::logs;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "yue", version, about = "Matrix command bot")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, env = "YUE_CONFIG", default_value = "data/config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    let data_dir = &config.bot.data_dir;
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    // Clear previous session log
    let log_path = data_dir.join("session.log");
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(data_dir, "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("{}", logs::banner(VERSION));

    // 3. Keep-alive endpoint
    let port = config.http_port();
    tokio::spawn(async move {
        if let Err(e) = infrastructure::http::serve(port).await {
            tracing::error!("Keep-alive endpoint stopped: {:#}", e);
        }
    });

    // 4. Command Registry (fatal on any malformed unit)
    tracing::info!("{}", logs::LOADED_COMMANDS);
    let registry = Arc::new(
        CommandRegistry::load(interface::commands::builtin())
            .context("Failed to load commands")?,
    );

    // 5. Storage
    let store = Arc::new(
        JsonStore::open(config.store_path())
            .await
            .context("Failed to open store")?,
    );

    // 6. Matrix Session
    let matrix = Arc::new(
        MatrixService::login(&config.services.matrix, &config.session_path()).await?,
    );

    if let Some(repo) = config.bot.update_repo.clone() {
        let checker = UpdateChecker::new(&repo, VERSION)?;
        tokio::spawn(async move { checker.notify().await });
    }

    // 7. Event Loop
    if registry.is_empty() {
        tracing::warn!("No commands registered; only the prefix query will be answered");
    }
    tracing::info!("{} commands: {:?}", registry.len(), registry.names());
    let router = Arc::new(CommandRouter::new(
        config.bot.prefix.clone(),
        registry,
        store,
        matrix.clone(),
    ));
    tracing::info!("Listening with prefix `{}`", router.prefix());

    matrix.listen(router).await
}
