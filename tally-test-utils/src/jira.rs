//! Jira REST payload fixtures
//!
//! Builders for the JSON shapes the tracker returns, plus helpers that mount
//! them on a [`wiremock::MockServer`].

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Story points field id used by the fixtures
pub const STORY_POINTS_FIELD: &str = "customfield_10049";

/// Builder for a single search-result issue
#[derive(Debug, Clone)]
pub struct IssueFixture {
  pub key: String,
  pub issue_type: String,
  pub summary: String,
  pub story_points: Option<Value>,
}

impl IssueFixture {
  /// A story with no story points set
  pub fn new(key: &str, summary: &str) -> Self {
    Self {
      key: key.to_string(),
      issue_type: "Story".to_string(),
      summary: summary.to_string(),
      story_points: None,
    }
  }

  /// Set the issue type name
  pub fn issue_type(mut self, issue_type: &str) -> Self {
    self.issue_type = issue_type.to_string();
    self
  }

  /// Set the raw story points value (number, string, null...)
  pub fn points(mut self, value: impl Into<Value>) -> Self {
    self.story_points = Some(value.into());
    self
  }

  /// Render the issue as the tracker would
  pub fn to_json(&self) -> Value {
    issue_json(&self.key, &self.issue_type, &self.summary, self.story_points.clone())
  }
}

/// JSON for one issue. `story_points: None` leaves the field out entirely.
pub fn issue_json(key: &str, issue_type: &str, summary: &str, story_points: Option<Value>) -> Value {
  let numeric_id = key
    .rsplit('-')
    .next()
    .and_then(|n| n.parse::<u64>().ok())
    .unwrap_or_default();

  let mut fields = json!({
    "summary": summary,
    "issuetype": { "id": "10001", "name": issue_type },
    "status": { "id": "3", "name": "In Progress" },
    "assignee": null,
  });
  if let (Some(points), Some(map)) = (story_points, fields.as_object_mut()) {
    map.insert(STORY_POINTS_FIELD.to_string(), points);
  }

  json!({
    "id": (10000 + numeric_id).to_string(),
    "key": key,
    "fields": fields,
  })
}

/// JSON for one changelog history event.
///
/// Each item is a `(fromString, toString)` pair; `None` becomes `null`.
pub fn history_json(author: Option<&str>, created: Option<&str>, items: &[(Option<&str>, Option<&str>)]) -> Value {
  let items: Vec<Value> = items
    .iter()
    .map(|(from, to)| {
      json!({
        "field": "status",
        "fieldtype": "jira",
        "fromString": from,
        "toString": to,
      })
    })
    .collect();

  let mut history = json!({ "id": "20000", "items": items });
  if let Some(map) = history.as_object_mut() {
    if let Some(author) = author {
      map.insert(
        "author".to_string(),
        json!({ "accountId": "557058:abc", "displayName": author }),
      );
    }
    if let Some(created) = created {
      map.insert("created".to_string(), json!(created));
    }
  }
  history
}

/// JSON for a changelog block wrapping the given histories
pub fn changelog_json(histories: Vec<Value>) -> Value {
  let total = histories.len();
  json!({
    "startAt": 0,
    "maxResults": total,
    "total": total,
    "histories": histories,
  })
}

/// JSON for one page of search results
pub fn search_page_json(start_at: usize, total: usize, issues: Vec<Value>) -> Value {
  json!({
    "expand": "names,schema",
    "startAt": start_at,
    "maxResults": 50,
    "total": total,
    "issues": issues,
  })
}

/// Mount a single-page search response for `jql`
pub async fn mount_search(server: &MockServer, jql: &str, issues: Vec<Value>) {
  let total = issues.len();
  Mock::given(method("GET"))
    .and(path("/rest/api/2/search"))
    .and(query_param("jql", jql))
    .respond_with(ResponseTemplate::new(200).set_body_json(search_page_json(0, total, issues)))
    .mount(server)
    .await;
}

/// Mount an issue response with `expand=changelog`; `None` omits the
/// changelog block
pub async fn mount_issue_with_changelog(server: &MockServer, key: &str, changelog: Option<Value>) {
  let mut body = issue_json(key, "Story", "Fixture issue", None);
  if let (Some(changelog), Some(map)) = (changelog, body.as_object_mut()) {
    map.insert("changelog".to_string(), changelog);
  }

  Mock::given(method("GET"))
    .and(path(format!("/rest/api/2/issue/{key}")))
    .and(query_param("expand", "changelog"))
    .respond_with(ResponseTemplate::new(200).set_body_json(body))
    .mount(server)
    .await;
}
