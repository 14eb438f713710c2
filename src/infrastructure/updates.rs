//! # Update Check
//!
//! Compares the running version with the latest GitHub release of the
//! configured repository and logs when a newer one exists.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::strings::logs;

const GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: Option<String>,
}

pub struct UpdateChecker {
    client: reqwest::Client,
    base_url: String,
    repo: String,
    current: String,
}

impl UpdateChecker {
    pub fn new(repo: &str, current: &str) -> Result<Self> {
        Self::with_base_url(GITHUB_API, repo, current)
    }

    pub fn with_base_url(base_url: &str, repo: &str, current: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("yue/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            repo: repo.to_string(),
            current: current.to_string(),
        })
    }

    /// Returns the latest tag when it differs from the running version.
    pub async fn check(&self) -> Result<Option<String>> {
        let url = format!("{}/repos/{}/releases/latest", self.base_url, self.repo);
        let release: Release = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(release
            .tag_name
            .filter(|tag| is_newer(tag, &self.current)))
    }

    /// Runs the check and logs the result. Never fails.
    pub async fn notify(&self) {
        match self.check().await {
            Ok(Some(latest)) => tracing::info!("{}", logs::new_version(&latest)),
            Ok(None) => tracing::debug!("Running the latest release"),
            Err(e) => tracing::warn!("Error checking for updates: {:#}", e),
        }
    }
}

fn is_newer(tag: &str, current: &str) -> bool {
    let tag = tag.trim_start_matches('v');
    !tag.is_empty() && tag != current.trim_start_matches('v')
}
