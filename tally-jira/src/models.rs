use serde::Deserialize;
use serde_json::{Map, Value};

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// Represents a Jira issue
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssue {
  #[serde(default)]
  pub id: String,
  pub key: String,
  #[serde(default)]
  pub fields: JiraIssueFields,
  /// Present only when requested with `expand=changelog`
  #[serde(default)]
  pub changelog: Option<JiraChangelog>,
}

/// Represents Jira issue fields.
///
/// Only the fields tally reads are typed; everything else, custom fields
/// included, lands in `custom` keyed by field id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraIssueFields {
  #[serde(default)]
  pub summary: String,
  #[serde(default)]
  pub issuetype: Option<JiraIssueType>,
  #[serde(default)]
  pub status: Option<JiraIssueStatus>,
  #[serde(default)]
  pub assignee: Option<JiraUser>,
  #[serde(default)]
  pub parent: Option<JiraParent>,
  #[serde(flatten)]
  pub custom: Map<String, Value>,
}

impl JiraIssueFields {
  /// Name of the issue type, `Unknown` when the tracker did not send one
  pub fn issue_type_name(&self) -> &str {
    self.issuetype.as_ref().map_or("Unknown", |t| t.name.as_str())
  }

  /// Numeric value of a field; `None` when absent, null or not a number
  pub fn number_field(&self, field_id: &str) -> Option<f64> {
    self.custom.get(field_id).and_then(Value::as_f64)
  }
}

/// Represents a Jira issue type
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueType {
  #[serde(default)]
  pub id: Option<String>,
  pub name: String,
}

/// Represents a Jira issue status
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueStatus {
  #[serde(default)]
  pub id: Option<String>,
  pub name: String,
}

/// Parent (epic) reference of an issue
#[derive(Debug, Clone, Deserialize)]
pub struct JiraParent {
  pub key: String,
  #[serde(default)]
  pub fields: Option<JiraParentFields>,
}

impl JiraParent {
  /// Summary of the parent, empty when not included
  pub fn summary(&self) -> &str {
    self.fields.as_ref().map_or("", |f| f.summary.as_str())
  }
}

/// The subset of parent fields Jira embeds in child issues
#[derive(Debug, Clone, Deserialize)]
pub struct JiraParentFields {
  #[serde(default)]
  pub summary: String,
}

/// Represents a Jira user as embedded in issues, changelogs and group listings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
  #[serde(default)]
  pub account_id: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub display_name: Option<String>,
  #[serde(default)]
  pub email_address: Option<String>,
}

/// Issue changelog returned with `expand=changelog`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraChangelog {
  #[serde(default)]
  pub histories: Vec<JiraHistory>,
}

/// One changelog event: who changed what, and when
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraHistory {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub author: Option<JiraUser>,
  /// Raw timestamp, e.g. `2024-01-15T10:30:00.000+0000`
  #[serde(default)]
  pub created: Option<String>,
  #[serde(default)]
  pub items: Vec<JiraChangeItem>,
}

/// A single field change within a changelog event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraChangeItem {
  #[serde(default)]
  pub field: Option<String>,
  #[serde(rename = "fromString", default)]
  pub from_value: Option<String>,
  #[serde(rename = "toString", default)]
  pub to_value: Option<String>,
}

/// One page of `/rest/api/2/search` results
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraSearchResults {
  #[serde(default)]
  pub start_at: u32,
  #[serde(default)]
  pub max_results: u32,
  #[serde(default)]
  pub total: u32,
  #[serde(default)]
  pub issues: Vec<JiraIssue>,
}

/// Response of the group picker endpoint
#[derive(Debug, Deserialize)]
pub struct JiraGroups {
  #[serde(default)]
  pub groups: Vec<JiraGroup>,
}

/// Represents a Jira group
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraGroup {
  pub name: String,
  #[serde(default)]
  pub group_id: Option<String>,
}

/// One page of group members
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUserPage {
  #[serde(default)]
  pub start_at: u32,
  #[serde(default = "default_is_last")]
  pub is_last: bool,
  #[serde(default)]
  pub values: Vec<JiraUser>,
}

const fn default_is_last() -> bool {
  true
}

/// Error body Jira attaches to 4xx responses
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraErrorBody {
  #[serde(default)]
  pub error_messages: Vec<String>,
  #[serde(default)]
  pub errors: Map<String, Value>,
}

impl JiraErrorBody {
  /// Collapse the error messages and per-field errors into one line
  pub fn describe(&self) -> String {
    let mut parts = self.error_messages.clone();
    parts.extend(
      self
        .errors
        .iter()
        .map(|(field, message)| format!("{field}: {}", message.as_str().unwrap_or_default())),
    );
    parts.join("; ")
  }
}
