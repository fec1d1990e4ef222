//! # History Command
//!
//! Status transitions of a single ticket, read from its changelog.

use anyhow::Result;
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use tally_core::consts::DEFAULT_TARGET_STATUS;
use tally_core::{FieldNames, print_warning};
use tally_jira::{JiraIssueService, filter_by_status};

use super::connect;

/// Command for showing a ticket's transitions
#[derive(Args)]
pub struct HistoryArgs {
  /// The Jira issue key (e.g., PROJ-123)
  #[arg(required = true, index = 1)]
  pub issue_key: String,

  /// Only show transitions into or out of this status
  #[arg(long, default_value = DEFAULT_TARGET_STATUS)]
  pub status: String,

  /// Show every change instead of filtering by status
  #[arg(long)]
  pub all: bool,
}

/// Handle the history command
pub(crate) fn handle_history_command(args: HistoryArgs) -> Result<()> {
  let (rt, client) = connect()?;
  let service = JiraIssueService::new(client, FieldNames::default());

  let Some(records) = rt.block_on(service.get_issue_history(&args.issue_key))? else {
    print_warning(&format!("No changelog found for issue {}", args.issue_key));
    return Ok(());
  };

  let shown: Vec<_> = if args.all {
    records.iter().collect()
  } else {
    filter_by_status(&records, &args.status).collect()
  };

  let key = args
    .issue_key
    .if_supports_color(Stream::Stdout, |k| k.bold().to_string())
    .to_string();
  if args.all {
    println!("- Changes for {key}");
  } else {
    println!("- Logs related to {} for {key}", args.status);
  }

  if shown.is_empty() {
    print_warning("No matching transitions");
  }
  for record in shown {
    println!(
      "  - **{}** -> **{}** by _{}_ on {}",
      record.from_status,
      record.to_status,
      record.author,
      record.created_label()
    );
  }

  Ok(())
}
