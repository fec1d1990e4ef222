//! # Report Command
//!
//! The main run: load the configuration, check the connection, write the
//! per-user report to stdout, then draw the chart of totals.

use std::io;

use anyhow::{Context, Result, bail};
use clap::Args;
use tally_core::consts::{
  DEFAULT_EPIC_LINK_FIELD, DEFAULT_PROGRAM_INCREMENT, DEFAULT_PROGRAM_INCREMENT_FIELD, DEFAULT_STORY_POINTS_FIELD,
  DEFAULT_TARGET_STATUS,
};
use tally_core::{FieldNames, ReportConfig, print_info, print_success};
use tally_jira::JiraIssueService;
use tally_jira::auth::create_jira_runtime_and_client;
use tracing::{error, info};

use crate::chart::{ChartMode, display_chart};
use crate::report::run_report;

/// Command for the Program Increment report
#[derive(Args)]
pub struct ReportArgs {
  /// Program Increment to report on
  #[arg(long = "pi", value_name = "PI", default_value = DEFAULT_PROGRAM_INCREMENT)]
  pub program_increment: String,

  /// Status whose transitions are listed for each ticket
  #[arg(long, default_value = DEFAULT_TARGET_STATUS)]
  pub status: String,

  /// Field id holding story points
  #[arg(long, value_name = "FIELD", default_value = DEFAULT_STORY_POINTS_FIELD)]
  pub story_points_field: String,

  /// JQL name of the Program Increment field
  #[arg(long, value_name = "FIELD", default_value = DEFAULT_PROGRAM_INCREMENT_FIELD)]
  pub pi_field: String,

  /// How to display the chart (interactive on a terminal, inline otherwise)
  #[arg(long, value_enum, ignore_case = true)]
  pub chart: Option<ChartMode>,
}

impl ReportArgs {
  fn fields(&self) -> FieldNames {
    FieldNames {
      story_points: self.story_points_field.clone(),
      program_increment: self.pi_field.clone(),
      epic_link: DEFAULT_EPIC_LINK_FIELD.to_string(),
    }
  }
}

/// Handle the report command
pub(crate) fn handle_report_command(args: ReportArgs) -> Result<()> {
  let config = ReportConfig::from_env()
    .inspect_err(|err| error!("{err}"))
    .context("Invalid configuration")?
    .with_program_increment(&args.program_increment)
    .with_target_status(&args.status)
    .with_fields(args.fields());

  let (rt, client) = create_jira_runtime_and_client(&config.jira)?;

  if !rt.block_on(client.test_connection())? {
    bail!("Failed to connect to Jira at {}", client.base_url());
  }
  info!("Connected to Jira at {}", client.base_url());

  print_info(&format!(
    "Tallying {} for {} user(s)",
    config.program_increment,
    config.usernames.len()
  ));

  let service = JiraIssueService::new(client, config.fields.clone());
  let totals = {
    let mut stdout = io::stdout().lock();
    rt.block_on(run_report(&service, &config, &mut stdout))
      .context("Failed to write report")?
  };

  let mode = args.chart.unwrap_or_else(ChartMode::detect);
  match display_chart(&totals, &config.program_increment, mode) {
    Ok(()) => print_success(&format!("Report complete for {}", config.program_increment)),
    Err(err) => error!("Error plotting: {err:#}"),
  }

  Ok(())
}
