use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::consts::USER_AGENT;
use crate::models::{JiraAuth, JiraErrorBody};

/// Represents a Jira API client
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: JiraAuth,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(base_url: &str, auth: JiraAuth) -> Self {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .build()
      .unwrap_or_else(|_| Client::new());
    Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
    }
  }

  /// Base URL requests are sent to
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Test the Jira connection by fetching the current user
  pub async fn test_connection(&self) -> Result<bool> {
    let url = format!("{}/rest/api/2/myself", self.base_url);

    let response = self
      .client
      .get(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .send()
      .await
      .context("Failed to connect to Jira")?;

    Ok(response.status().is_success())
  }

  /// Issue an authenticated GET and decode the JSON body.
  ///
  /// `subject` names the resource in error messages, e.g. `Jira issue
  /// PROJ-1`.
  pub(crate) async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
    subject: &str,
  ) -> Result<T> {
    let url = format!("{}{}", self.base_url, path);
    trace!("GET {url} {query:?}");

    let response = self
      .client
      .get(&url)
      .query(query)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .send()
      .await
      .with_context(|| format!("Failed to fetch {subject}"))?;

    match response.status() {
      StatusCode::OK => response
        .json::<T>()
        .await
        .with_context(|| format!("Failed to parse {subject}")),
      StatusCode::BAD_REQUEST => {
        let body = response.text().await.unwrap_or_default();
        Err(anyhow::anyhow!("Invalid query for {subject}: {}", describe_error(&body)))
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("{subject} not found")),
      status => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        status,
        response.text().await.unwrap_or_default()
      )),
    }
  }
}

/// Pull the human-readable messages out of a Jira error body, falling back to
/// the raw text
fn describe_error(body: &str) -> String {
  serde_json::from_str::<JiraErrorBody>(body)
    .map(|parsed| parsed.describe())
    .ok()
    .filter(|described| !described.is_empty())
    .unwrap_or_else(|| body.to_string())
}

/// Create a Jira client from credentials
pub fn create_jira_client(base_url: &str, username: &str, api_token: &str) -> JiraClient {
  let auth = JiraAuth {
    username: username.to_string(),
    api_token: api_token.to_string(),
  };

  JiraClient::new(base_url, auth)
}
