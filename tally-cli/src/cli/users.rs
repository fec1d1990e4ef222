//! # Users Command
//!
//! Lists Jira groups and their members, handy for filling in USERNAMES.

use anyhow::Result;
use clap::Args;
use tally_core::{print_header, print_warning};
use tally_jira::JiraUser;
use tracing::error;

use super::connect;

/// Command for listing groups and members
#[derive(Args)]
pub struct UsersArgs {
  /// Only list the members of this group
  #[arg(long, value_name = "NAME")]
  pub group: Option<String>,
}

/// Handle the users command
pub(crate) fn handle_users_command(args: UsersArgs) -> Result<()> {
  let (rt, client) = connect()?;

  let group_names = match args.group {
    Some(group) => vec![group],
    None => {
      println!("Available Jira groups:");
      rt.block_on(client.get_groups())?
        .into_iter()
        .map(|group| group.name)
        .collect()
    }
  };

  for group_name in group_names {
    print_header(&format!("Users in group: {group_name}"));
    match rt.block_on(client.get_group_members(&group_name)) {
      Ok(members) if members.is_empty() => print_warning("No members"),
      Ok(members) => {
        for member in &members {
          println!("{}", describe_member(member));
        }
      }
      Err(err) => error!("Failed to list members of {group_name}: {err:#}"),
    }
  }

  Ok(())
}

fn describe_member(user: &JiraUser) -> String {
  let name = user
    .display_name
    .as_deref()
    .or(user.account_id.as_deref())
    .unwrap_or("Unknown User");
  let email = user.email_address.as_deref().unwrap_or("No Email");
  format!("Display Name: {name}, Email: {email}")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user(display_name: Option<&str>, account_id: Option<&str>, email: Option<&str>) -> JiraUser {
    serde_json::from_value(serde_json::json!({
      "displayName": display_name,
      "accountId": account_id,
      "emailAddress": email,
    }))
    .unwrap()
  }

  #[test]
  fn test_describe_member() {
    assert_eq!(
      describe_member(&user(Some("Alice Doe"), Some("a-1"), Some("alice@example.com"))),
      "Display Name: Alice Doe, Email: alice@example.com"
    );
    assert_eq!(
      describe_member(&user(None, Some("a-2"), None)),
      "Display Name: a-2, Email: No Email"
    );
    assert_eq!(
      describe_member(&user(None, None, None)),
      "Display Name: Unknown User, Email: No Email"
    );
  }
}
