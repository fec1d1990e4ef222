//! # Jira Search Endpoint
//!
//! JQL search against `/rest/api/2/search`, following `startAt` pages until
//! every matching issue has been collected.

use anyhow::Result;
use tracing::debug;

use crate::client::JiraClient;
use crate::consts::SEARCH_PAGE_SIZE;
use crate::models::{JiraIssue, JiraSearchResults};

impl JiraClient {
  /// Fetch one page of search results
  pub async fn search_page(&self, jql: &str, start_at: u32, max_results: u32) -> Result<JiraSearchResults> {
    self
      .get_json(
        "/rest/api/2/search",
        &[
          ("jql", jql.to_string()),
          ("startAt", start_at.to_string()),
          ("maxResults", max_results.to_string()),
        ],
        "Jira search results",
      )
      .await
  }

  /// Run a JQL query and return every matching issue
  pub async fn search_issues(&self, jql: &str) -> Result<Vec<JiraIssue>> {
    let mut issues: Vec<JiraIssue> = Vec::new();

    loop {
      let start_at = issues.len() as u32;
      let page = self.search_page(jql, start_at, SEARCH_PAGE_SIZE).await?;
      let fetched = page.issues.len();
      debug!(
        "Search page at {} returned {} of {} issues",
        page.start_at, fetched, page.total
      );

      issues.extend(page.issues);
      if fetched == 0 || issues.len() as u32 >= page.total {
        break;
      }
    }

    Ok(issues)
  }
}
