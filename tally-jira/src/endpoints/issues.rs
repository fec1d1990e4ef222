//! # Jira Issue Endpoints
//!
//! Jira API endpoint implementations for reading single issues, with or
//! without their changelog.

use anyhow::Result;
use url::form_urlencoded;

use crate::client::JiraClient;
use crate::models::JiraIssue;

/// REST path of one issue, with the key percent-encoded as a single segment
fn issue_path(issue_key: &str) -> String {
  let encoded: String = form_urlencoded::byte_serialize(issue_key.as_bytes()).collect();
  // form encoding writes spaces as '+', which a path would keep literally
  format!("/rest/api/2/issue/{}", encoded.replace('+', "%20"))
}

impl JiraClient {
  /// Get a Jira issue by key
  pub async fn get_issue(&self, issue_key: &str) -> Result<JiraIssue> {
    self
      .get_json(
        &issue_path(issue_key),
        &[],
        &format!("Jira issue {issue_key}"),
      )
      .await
  }

  /// Get a Jira issue by key with its changelog expanded
  pub async fn get_issue_with_changelog(&self, issue_key: &str) -> Result<JiraIssue> {
    self
      .get_json(
        &issue_path(issue_key),
        &[("expand", "changelog".to_string())],
        &format!("Jira issue {issue_key}"),
      )
      .await
  }
}

#[cfg(test)]
mod tests {
  use tally_test_utils::jira::mount_issue_with_changelog;
  use tally_test_utils::{changelog_json, history_json};
  use wiremock::matchers::{basic_auth, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::issue_path;
  use crate::client::JiraClient;
  use crate::models::JiraAuth;

  fn test_client(base_url: &str, api_token: &str) -> JiraClient {
    let auth = JiraAuth {
      username: "test_user".to_string(),
      api_token: api_token.to_string(),
    };
    JiraClient::new(base_url, auth)
  }

  #[tokio::test]
  async fn test_get_issue() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), "test_token");

    // Mock response for issue
    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/TEST-123"))
      .and(basic_auth("test_user", "test_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "id": "10000",
          "key": "TEST-123",
          "fields": {
              "summary": "Test issue",
              "issuetype": { "name": "Bug" },
              "status": {
                  "id": "10001",
                  "name": "In Progress",
                  "statusCategory": {
                      "id": 4,
                      "key": "indeterminate",
                      "name": "In Progress"
                  }
              }
          }
      })))
      .mount(&mock_server)
      .await;

    let issue = client.get_issue("TEST-123").await?;
    assert_eq!(issue.key, "TEST-123");
    assert_eq!(issue.fields.summary, "Test issue");
    assert_eq!(issue.fields.issue_type_name(), "Bug");
    assert!(issue.changelog.is_none());

    Ok(())
  }

  #[tokio::test]
  async fn test_get_issue_with_changelog() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), "test_token");

    let changelog = changelog_json(vec![history_json(
      Some("Alice"),
      Some("2024-01-15T10:30:00.000+0000"),
      &[(Some("To Do"), Some("In Development"))],
    )]);
    mount_issue_with_changelog(&mock_server, "ILX-51628", Some(changelog)).await;

    let issue = client.get_issue_with_changelog("ILX-51628").await?;
    let changelog = issue.changelog.expect("changelog requested");
    assert_eq!(changelog.histories.len(), 1);
    assert_eq!(changelog.histories[0].items.len(), 1);

    Ok(())
  }

  #[tokio::test]
  async fn test_get_issue_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), "test_token");

    // Mock 404 response
    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/NONEXISTENT-123"))
      .and(basic_auth("test_user", "test_token"))
      .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
          "errorMessages": ["Issue does not exist or you do not have permission to see it."],
          "errors": {}
      })))
      .mount(&mock_server)
      .await;

    let result = client.get_issue("NONEXISTENT-123").await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));

    Ok(())
  }

  #[tokio::test]
  async fn test_get_issue_unauthorized() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), "invalid_token");

    // Mock unauthorized response
    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/TEST-123"))
      .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
          "errorMessages": ["Authentication failed"],
          "errors": {}
      })))
      .mount(&mock_server)
      .await;

    let result = client.get_issue("TEST-123").await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Authentication failed"));

    Ok(())
  }

  #[tokio::test]
  async fn test_get_issue_malformed_body() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/TEST-7"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
      .mount(&mock_server)
      .await;

    let result = client.get_issue("TEST-7").await;
    assert!(result.unwrap_err().to_string().contains("Failed to parse"));

    Ok(())
  }

  #[test]
  fn test_issue_path_encodes_key_as_one_segment() {
    assert_eq!(issue_path("PROJ-1"), "/rest/api/2/issue/PROJ-1");
    assert_eq!(issue_path("PROJ-1/../../myself"), "/rest/api/2/issue/PROJ-1%2F..%2F..%2Fmyself");
    assert_eq!(issue_path("A B?x=1"), "/rest/api/2/issue/A%20B%3Fx%3D1");
  }

  #[tokio::test]
  async fn test_get_issue_key_cannot_reach_other_endpoints() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/myself"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "test_user" })))
      .expect(0)
      .mount(&mock_server)
      .await;

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/PROJ-1%2F..%2F..%2Fmyself"))
      .respond_with(ResponseTemplate::new(404))
      .expect(1)
      .mount(&mock_server)
      .await;

    let error = client.get_issue("PROJ-1/../../myself").await.unwrap_err().to_string();
    assert!(error.contains("not found"));

    Ok(())
  }
}
