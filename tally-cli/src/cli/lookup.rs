//! # Lookup Command
//!
//! Ad-hoc listing of the tickets assigned to one email address.

use anyhow::Result;
use clap::Args;
use tally_core::FieldNames;
use tally_jira::JiraIssueService;

use super::connect;

/// Command for looking up tickets by assignee email
#[derive(Args)]
pub struct LookupArgs {
  /// Email address of the assignee
  #[arg(required = true, index = 1)]
  pub email: String,
}

/// Handle the lookup command
pub(crate) fn handle_lookup_command(args: LookupArgs) -> Result<()> {
  let (rt, client) = connect()?;
  let service = JiraIssueService::new(client, FieldNames::default());

  match rt.block_on(service.fetch_issues_by_email(&args.email)) {
    Some(issues) if !issues.is_empty() => {
      for issue in issues {
        println!("{}: {}", issue.key, issue.fields.summary);
      }
    }
    _ => println!("No issues found for {}", args.email),
  }

  Ok(())
}
