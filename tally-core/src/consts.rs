//! Core constants shared across tally components.

/// Environment variable holding the Jira base URL.
pub const ENV_JIRA_URL: &str = "JIRA_URL";

/// Environment variable holding the Jira account used for basic auth.
pub const ENV_JIRA_USERNAME: &str = "JIRA_USERNAME";

/// Environment variable holding the Jira API token.
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";

/// Environment variable holding the comma-separated list of assignees to report on.
pub const ENV_USERNAMES: &str = "USERNAMES";

/// Program Increment reported on when none is given.
pub const DEFAULT_PROGRAM_INCREMENT: &str = "PI-10";

/// Status whose transitions are listed under each issue.
pub const DEFAULT_TARGET_STATUS: &str = "In Development";

/// Custom field carrying story points.
pub const DEFAULT_STORY_POINTS_FIELD: &str = "customfield_10049";

/// Dropdown field holding the Program Increment, as JQL names it.
pub const DEFAULT_PROGRAM_INCREMENT_FIELD: &str = "Program Increment (PI)[Dropdown]";

/// Field linking an issue to its epic, as JQL names it.
pub const DEFAULT_EPIC_LINK_FIELD: &str = "Epic Link";
