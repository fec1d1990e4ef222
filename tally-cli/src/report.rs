//! # Story-Point Report
//!
//! Walks each user's issues for a Program Increment, totals their story
//! points, and writes the Markdown-flavoured report with the status
//! transitions of every issue.

use std::io::{self, Write};

use tally_core::output::format_warning;
use tally_core::{ReportConfig, format_points};
use tally_jira::{JiraIssue, JiraIssueService, StatusHistoryRecord, story_points};
use tracing::{error, info};

/// Story-point totals per user, in the order users were first seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryPointTotals {
  entries: Vec<(String, f64)>,
}

impl StoryPointTotals {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add `points` to a user's total, creating the entry at zero first if
  /// needed
  pub fn add(&mut self, username: &str, points: f64) {
    match self.entries.iter_mut().find(|(name, _)| name == username) {
      Some((_, total)) => *total += points,
      None => self.entries.push((username.to_string(), points)),
    }
  }

  pub fn get(&self, username: &str) -> Option<f64> {
    self
      .entries
      .iter()
      .find(|(name, _)| name == username)
      .map(|(_, total)| *total)
  }

  pub fn entries(&self) -> &[(String, f64)] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Sum over every user
  pub fn grand_total(&self) -> f64 {
    self.entries.iter().map(|(_, total)| total).sum()
  }
}

/// One issue as it appears in the report
#[derive(Debug, Clone)]
pub struct IssueLine {
  pub key: String,
  pub issue_type: String,
  pub summary: String,
  /// `None` when the story points field is absent or not a number
  pub story_points: Option<f64>,
  /// Transitions entering or leaving the target status
  pub transitions: Vec<StatusHistoryRecord>,
}

impl IssueLine {
  fn from_issue(issue: &JiraIssue, story_points_field: &str, transitions: Vec<StatusHistoryRecord>) -> Self {
    Self {
      key: issue.key.clone(),
      issue_type: issue.fields.issue_type_name().to_string(),
      summary: issue.fields.summary.clone(),
      story_points: story_points(issue, story_points_field),
      transitions,
    }
  }

  /// Points this issue adds to its user's total
  pub fn contribution(&self) -> f64 {
    self.story_points.unwrap_or(0.0)
  }
}

/// Everything reported for one user
#[derive(Debug, Clone)]
pub struct UserReport {
  pub username: String,
  pub issues: Vec<IssueLine>,
}

impl UserReport {
  pub fn total(&self) -> f64 {
    self.issues.iter().map(IssueLine::contribution).sum()
  }
}

/// Fetch one user's issues and their target-status transitions.
///
/// Returns `None` when the query fails or finds nothing. A failed history
/// lookup is logged and leaves that issue without transitions.
pub async fn build_user_report(
  service: &JiraIssueService,
  username: &str,
  config: &ReportConfig,
) -> Option<UserReport> {
  let issues = service
    .fetch_issues_by_username(username, &config.program_increment)
    .await?;
  if issues.is_empty() {
    return None;
  }

  let mut lines = Vec::with_capacity(issues.len());
  for issue in &issues {
    let transitions = match service.get_issue_history(&issue.key).await {
      Ok(Some(records)) => records
        .into_iter()
        .filter(|record| record.touches_status(&config.target_status))
        .collect(),
      Ok(None) => Vec::new(),
      Err(err) => {
        error!("Failed to fetch history for {}: {err:#}", issue.key);
        Vec::new()
      }
    };
    lines.push(IssueLine::from_issue(issue, &config.fields.story_points, transitions));
  }

  Some(UserReport {
    username: username.to_string(),
    issues: lines,
  })
}

/// Write the section for one user
pub fn write_user_report<W: Write>(out: &mut W, report: &UserReport, config: &ReportConfig) -> io::Result<()> {
  writeln!(out, "## Jira tickets for {}", report.username)?;

  for issue in &report.issues {
    let points = issue.story_points.map(format_points).unwrap_or_else(|| "-".to_string());
    if issue.story_points.is_none() {
      writeln!(
        out,
        "{}",
        format_warning(&format!(
          ">>> {} {} has missing Story Point ({}) value.",
          issue.issue_type, issue.key, config.fields.story_points
        ))
      )?;
    }
    writeln!(
      out,
      "#### [{}] | {} | {} | Points: {}",
      issue.key, issue.issue_type, issue.summary, points
    )?;

    writeln!(out, "- Logs related to {} for {}", config.target_status, issue.key)?;
    for record in &issue.transitions {
      writeln!(
        out,
        "  - **{}** -> **{}** by _{}_ on {}",
        record.from_status,
        record.to_status,
        record.author,
        record.created_label()
      )?;
    }
  }

  writeln!(out)?;
  writeln!(
    out,
    "### Total {} Story Points: {}",
    config.program_increment,
    format_points(report.total())
  )?;
  writeln!(out)
}

/// Run the report for every configured user, writing each section to `out`.
///
/// Users with no issues get a warning line and no entry in the totals.
pub async fn run_report<W: Write>(
  service: &JiraIssueService,
  config: &ReportConfig,
  out: &mut W,
) -> io::Result<StoryPointTotals> {
  let mut totals = StoryPointTotals::new();

  for username in &config.usernames {
    info!("Collecting {} issues for {username}", config.program_increment);
    match build_user_report(service, username, config).await {
      Some(report) => {
        write_user_report(out, &report, config)?;
        totals.add(username, report.total());
      }
      None => {
        writeln!(out, "## Jira tickets for {username}")?;
        writeln!(out, "{}", format_warning(&format!("No issues found for {username}.")))?;
        writeln!(out)?;
      }
    }
  }

  Ok(totals)
}

#[cfg(test)]
mod tests {
  use tally_core::{FieldNames, JiraSettings};
  use tally_jira::create_jira_client;
  use tally_test_utils::jira::{mount_issue_with_changelog, mount_search};
  use tally_test_utils::{IssueFixture, changelog_json, history_json};
  use wiremock::MockServer;

  use super::*;

  fn config_for(server: &MockServer, usernames: &[&str]) -> ReportConfig {
    let settings = JiraSettings {
      base_url: server.uri(),
      username: "bot@example.com".to_string(),
      api_token: "token".to_string(),
    };
    ReportConfig::new(settings, usernames.iter().map(|u| u.to_string()).collect())
  }

  fn service_for(server: &MockServer) -> JiraIssueService {
    JiraIssueService::new(
      create_jira_client(&server.uri(), "bot@example.com", "token"),
      FieldNames::default(),
    )
  }

  fn user_jql(username: &str) -> String {
    format!(r#"assignee = "{username}" AND "Program Increment (PI)[Dropdown]" = "PI-10""#)
  }

  #[test]
  fn test_totals_keep_insertion_order() {
    let mut totals = StoryPointTotals::new();
    totals.add("bob", 2.0);
    totals.add("alice", 5.0);
    totals.add("bob", 3.0);

    let names: Vec<_> = totals.entries().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["bob", "alice"]);
    assert_eq!(totals.get("bob"), Some(5.0));
    assert_eq!(totals.get("carol"), None);
    assert_eq!(totals.grand_total(), 10.0);
  }

  #[test]
  fn test_totals_zero_entry_is_kept() {
    let mut totals = StoryPointTotals::new();
    totals.add("dave", 0.0);
    assert_eq!(totals.len(), 1);
    assert_eq!(totals.get("dave"), Some(0.0));
  }

  #[tokio::test]
  async fn test_report_totals_and_missing_points_warning() {
    let server = MockServer::start().await;
    mount_search(
      &server,
      &user_jql("alice"),
      vec![
        IssueFixture::new("PROJ-1", "Login").points(3).to_json(),
        IssueFixture::new("PROJ-2", "Logout").points(5).to_json(),
        IssueFixture::new("PROJ-3", "Docs").issue_type("Task").to_json(),
      ],
    )
    .await;
    for key in ["PROJ-1", "PROJ-2", "PROJ-3"] {
      mount_issue_with_changelog(&server, key, Some(changelog_json(vec![]))).await;
    }

    let config = config_for(&server, &["alice"]);
    let mut out = Vec::new();
    let totals = run_report(&service_for(&server), &config, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(totals.get("alice"), Some(8.0));
    assert!(text.contains("## Jira tickets for alice"));
    assert!(text.contains("#### [PROJ-1] | Story | Login | Points: 3"));
    assert!(text.contains("#### [PROJ-3] | Task | Docs | Points: -"));
    assert!(text.contains(">>> Task PROJ-3 has missing Story Point (customfield_10049) value."));
    assert!(!text.contains("PROJ-1 has missing"));
    assert!(text.contains("### Total PI-10 Story Points: 8"));
  }

  #[tokio::test]
  async fn test_report_lists_target_status_transitions() {
    let server = MockServer::start().await;
    mount_search(
      &server,
      &user_jql("alice"),
      vec![IssueFixture::new("ILX-51628", "Checkout").points(2).to_json()],
    )
    .await;
    mount_issue_with_changelog(
      &server,
      "ILX-51628",
      Some(changelog_json(vec![history_json(
        Some("Alice Doe"),
        Some("2024-01-15T10:30:00.000+0000"),
        &[(Some("To Do"), Some("In Development")), (Some("Priority"), Some("High"))],
      )])),
    )
    .await;

    let config = config_for(&server, &["alice"]);
    let mut out = Vec::new();
    run_report(&service_for(&server), &config, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("- Logs related to In Development for ILX-51628"));
    assert!(text.contains("  - **To Do** -> **In Development** by _Alice Doe_ on 2024-01-15"));
    assert!(!text.contains("**Priority**"));
  }

  #[tokio::test]
  async fn test_report_missing_changelog_is_not_fatal() {
    let server = MockServer::start().await;
    mount_search(
      &server,
      &user_jql("bob"),
      vec![IssueFixture::new("PROJ-7", "No history").points(1).to_json()],
    )
    .await;
    mount_issue_with_changelog(&server, "PROJ-7", None).await;

    let config = config_for(&server, &["bob"]);
    let mut out = Vec::new();
    let totals = run_report(&service_for(&server), &config, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(totals.get("bob"), Some(1.0));
    assert!(text.contains("- Logs related to In Development for PROJ-7"));
  }

  #[tokio::test]
  async fn test_user_without_issues_has_no_entry() {
    let server = MockServer::start().await;
    mount_search(&server, &user_jql("carol"), vec![]).await;
    mount_search(
      &server,
      &user_jql("dave"),
      vec![IssueFixture::new("PROJ-9", "Unsized").to_json()],
    )
    .await;
    mount_issue_with_changelog(&server, "PROJ-9", Some(changelog_json(vec![]))).await;

    let config = config_for(&server, &["carol", "dave"]);
    let mut out = Vec::new();
    let totals = run_report(&service_for(&server), &config, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(totals.get("carol"), None);
    assert!(text.contains("No issues found for carol."));
    // A user with issues is present even at zero
    assert_eq!(totals.get("dave"), Some(0.0));
    assert_eq!(totals.len(), 1);
  }

  #[tokio::test]
  async fn test_totals_conserve_issue_points() {
    let server = MockServer::start().await;
    mount_search(
      &server,
      &user_jql("alice"),
      vec![
        IssueFixture::new("A-1", "a").points(2.5).to_json(),
        IssueFixture::new("A-2", "b").points("n/a").to_json(),
      ],
    )
    .await;
    mount_search(
      &server,
      &user_jql("bob"),
      vec![IssueFixture::new("B-1", "c").points(8).to_json()],
    )
    .await;
    for key in ["A-1", "A-2", "B-1"] {
      mount_issue_with_changelog(&server, key, Some(changelog_json(vec![]))).await;
    }

    let config = config_for(&server, &["alice", "bob"]);
    let mut out = Vec::new();
    let totals = run_report(&service_for(&server), &config, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(totals.get("alice"), Some(2.5));
    assert_eq!(totals.get("bob"), Some(8.0));
    assert_eq!(totals.grand_total(), 10.5);
    // A non-numeric value counts as zero and is flagged
    assert!(text.contains(">>> Story A-2 has missing Story Point (customfield_10049) value."));
    assert!(text.contains("#### [A-2] | Story | b | Points: -"));
  }
}
