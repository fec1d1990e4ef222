//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the tally tool: the
//! Program Increment report plus the smaller lookups it is built from.

mod epic;
mod history;
mod lookup;
mod report;
mod users;

use anyhow::{Context, Result};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use tally_core::{ColorMode, JiraSettings};
use tally_jira::JiraClient;
use tally_jira::auth::create_jira_runtime_and_client;
use tokio::runtime::Runtime;
use tracing::error;

/// Top-level CLI command for the tally tool
#[derive(Parser)]
#[command(name = "tally")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Story-point totals per user for a Jira Program Increment")]
#[command(
  long_about = "Tally queries Jira for the tickets assigned to each configured user within a\n\
        Program Increment, totals their story points, lists the status transitions of\n\
        every ticket, and draws a bar chart of the totals.\n\n\
        Connection settings come from JIRA_URL, JIRA_USERNAME and JIRA_API_TOKEN, and the\n\
        users from USERNAMES (comma-separated). A .env file in the working directory is\n\
        loaded first if present."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the tally tool
#[derive(Subcommand)]
pub enum Commands {
  /// Story-point report and chart for every configured user
  #[command(long_about = "Report the tickets of every user in USERNAMES for one Program Increment.\n\n\
            For each ticket the report shows its type, summary and story points, followed by\n\
            every transition into or out of the target status. Totals per user are then\n\
            drawn as a bar chart.")]
  Report(report::ReportArgs),

  /// List the tickets assigned to an email address
  #[command(long_about = "List every ticket assigned to the given email address as 'KEY: summary'.")]
  Lookup(lookup::LookupArgs),

  /// Show the status transitions of one ticket
  #[command(long_about = "Show the status transitions recorded in a ticket's changelog.\n\n\
            By default only transitions into or out of the target status are shown;\n\
            use --all to list every change.")]
  History(history::HistoryArgs),

  /// Total the story points of an epic
  #[command(long_about = "Sum the story points of every ticket linked to an epic.\n\n\
            Tickets without a numeric story points value count as zero.")]
  Epic(epic::EpicArgs),

  /// List Jira groups and their members
  #[command(long_about = "List the Jira groups visible to the configured account and the display\n\
            name and email of each member. Use --group to list a single group.")]
  Users(users::UsersArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  // Set global color override based on --colors argument
  cli.colors.apply();

  match cli.command {
    Commands::Report(args) => report::handle_report_command(args),
    Commands::Lookup(args) => lookup::handle_lookup_command(args),
    Commands::History(args) => history::handle_history_command(args),
    Commands::Epic(args) => epic::handle_epic_command(args),
    Commands::Users(args) => users::handle_users_command(args),
  }
}

/// Load tracker settings from the environment, logging any problem
pub(crate) fn load_jira_settings() -> Result<JiraSettings> {
  JiraSettings::from_env()
    .inspect_err(|err| error!("{err}"))
    .context("Invalid Jira configuration")
}

/// Creates a runtime and a client for the tracker configured in the
/// environment.
pub(crate) fn connect() -> Result<(Runtime, JiraClient)> {
  let settings = load_jira_settings()?;
  create_jira_runtime_and_client(&settings)
}
