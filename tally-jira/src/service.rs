//! # Issue Query Service
//!
//! The read-only operations the reports are built from, on top of
//! [`JiraClient`]. Query failures are logged here and degrade to "nothing
//! found" so a report can move on to the next user; only the per-issue
//! history lookup hands transport errors back to its caller.

use anyhow::Result;
use tally_core::FieldNames;
use tracing::{debug, error, warn};

use crate::client::JiraClient;
use crate::history::{StatusHistoryRecord, extract_status_history};
use crate::jql;
use crate::models::JiraIssue;

/// Issue queries against one tracker
pub struct JiraIssueService {
  client: JiraClient,
  fields: FieldNames,
}

impl JiraIssueService {
  /// Wrap a client; `fields` names the custom fields the queries rely on
  pub fn new(client: JiraClient, fields: FieldNames) -> Self {
    Self { client, fields }
  }

  /// Issues assigned to `username` in Program Increment `pi`.
  ///
  /// Returns `None` when the query fails.
  pub async fn fetch_issues_by_username(&self, username: &str, pi: &str) -> Option<Vec<JiraIssue>> {
    let query = jql::assigned_in_program_increment(username, &self.fields.program_increment, pi);
    self.run_query(&query, &format!("user {username} in {pi}")).await
  }

  /// Issues assigned to the account with this email address.
  ///
  /// Returns `None` when the query fails.
  pub async fn fetch_issues_by_email(&self, email: &str) -> Option<Vec<JiraIssue>> {
    let query = jql::assigned_to(email);
    self.run_query(&query, &format!("assignee {email}")).await
  }

  /// Status-transition history of one issue.
  ///
  /// `Ok(None)` means the tracker returned the issue without a changelog.
  pub async fn get_issue_history(&self, issue_key: &str) -> Result<Option<Vec<StatusHistoryRecord>>> {
    let issue = self.client.get_issue_with_changelog(issue_key).await?;

    match issue.changelog {
      Some(changelog) => Ok(Some(extract_status_history(&changelog))),
      None => {
        warn!("No changelog found for issue {issue_key}");
        Ok(None)
      }
    }
  }

  /// Summary of one issue, e.g. an epic's title.
  ///
  /// Returns `None` when the issue cannot be fetched.
  pub async fn get_issue_summary(&self, issue_key: &str) -> Option<String> {
    match self.client.get_issue(issue_key).await {
      Ok(issue) => Some(issue.fields.summary),
      Err(err) => {
        warn!("Could not fetch {issue_key}: {err:#}");
        None
      }
    }
  }

  /// Sum of story points over every issue linked to `epic_key`.
  ///
  /// Missing or non-numeric values count as zero, and a failed query yields
  /// zero.
  pub async fn get_total_story_points_for_epic(&self, epic_key: &str) -> f64 {
    let query = jql::linked_to_epic(&self.fields.epic_link, epic_key);
    match self.client.search_issues(&query).await {
      Ok(issues) => sum_story_points(&issues, &self.fields.story_points),
      Err(err) => {
        error!("Error fetching issues for epic {epic_key}: {err:#}");
        0.0
      }
    }
  }

  async fn run_query(&self, query: &str, subject: &str) -> Option<Vec<JiraIssue>> {
    debug!("Running JQL: {query}");
    match self.client.search_issues(query).await {
      Ok(issues) => Some(issues),
      Err(err) => {
        error!("Error fetching issues for {subject}: {err:#}");
        None
      }
    }
  }
}

/// Story points of one issue, `None` when absent or not a number
pub fn story_points(issue: &JiraIssue, field_id: &str) -> Option<f64> {
  issue.fields.number_field(field_id)
}

/// Sum story points, counting missing or non-numeric values as zero
pub fn sum_story_points(issues: &[JiraIssue], field_id: &str) -> f64 {
  issues
    .iter()
    .map(|issue| story_points(issue, field_id).unwrap_or(0.0))
    .sum()
}
