//! # Epic Command
//!
//! Story-point total across the tickets linked to one epic, labelled with
//! the epic's summary when it can be fetched.

use anyhow::Result;
use clap::Args;
use tally_core::consts::DEFAULT_EPIC_LINK_FIELD;
use tally_core::{FieldNames, format_points, print_success};
use tally_jira::JiraIssueService;

use super::connect;

/// Command for totalling an epic
#[derive(Args)]
pub struct EpicArgs {
  /// The epic's issue key (e.g., SCRUM-1)
  #[arg(required = true, index = 1)]
  pub epic_key: String,

  /// JQL name of the epic link field
  #[arg(long, value_name = "FIELD", default_value = DEFAULT_EPIC_LINK_FIELD)]
  pub epic_link_field: String,
}

/// Handle the epic command
pub(crate) fn handle_epic_command(args: EpicArgs) -> Result<()> {
  let (rt, client) = connect()?;
  let fields = FieldNames {
    epic_link: args.epic_link_field,
    ..FieldNames::default()
  };
  let service = JiraIssueService::new(client, fields);

  let summary = rt.block_on(service.get_issue_summary(&args.epic_key));
  let total = rt.block_on(service.get_total_story_points_for_epic(&args.epic_key));

  let label = match summary {
    Some(summary) => format!("{} ({summary})", args.epic_key),
    None => args.epic_key.clone(),
  };
  print_success(&format!("Total story points for {label}: {}", format_points(total)));

  Ok(())
}
