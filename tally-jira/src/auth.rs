//! Client construction from loaded settings.
//!
//! Every command builds its runtime and client the same way, so the pairing
//! lives here rather than in each handler.

use anyhow::{Context, Result};
use tally_core::JiraSettings;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::{JiraClient, create_jira_client};

/// Build an authenticated client for the configured tracker
pub fn create_jira_client_from_settings(settings: &JiraSettings) -> JiraClient {
  debug!("Creating Jira client for {}", settings.base_url);
  create_jira_client(&settings.base_url, &settings.username, &settings.api_token)
}

/// Creates a single-threaded tokio runtime and an authenticated Jira client.
pub fn create_jira_runtime_and_client(settings: &JiraSettings) -> Result<(Runtime, JiraClient)> {
  let rt = Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let client = create_jira_client_from_settings(settings);
  Ok((rt, client))
}
