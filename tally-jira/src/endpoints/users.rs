//! # Jira Group and User Endpoints
//!
//! Listing groups and their members, used to discover the usernames a report
//! should cover.

use anyhow::Result;

use crate::client::JiraClient;
use crate::consts::GROUP_MEMBER_PAGE_SIZE;
use crate::models::{JiraGroup, JiraGroups, JiraUser, JiraUserPage};

impl JiraClient {
  /// List the groups visible to the authenticated account
  pub async fn get_groups(&self) -> Result<Vec<JiraGroup>> {
    let groups: JiraGroups = self
      .get_json("/rest/api/2/groups/picker", &[], "Jira groups")
      .await?;
    Ok(groups.groups)
  }

  /// List every member of a group
  pub async fn get_group_members(&self, group_name: &str) -> Result<Vec<JiraUser>> {
    let mut members: Vec<JiraUser> = Vec::new();

    loop {
      let page: JiraUserPage = self
        .get_json(
          "/rest/api/2/group/member",
          &[
            ("groupname", group_name.to_string()),
            ("startAt", members.len().to_string()),
            ("maxResults", GROUP_MEMBER_PAGE_SIZE.to_string()),
          ],
          &format!("Jira group {group_name}"),
        )
        .await?;

      let fetched = page.values.len();
      members.extend(page.values);
      if page.is_last || fetched == 0 {
        break;
      }
    }

    Ok(members)
  }
}
