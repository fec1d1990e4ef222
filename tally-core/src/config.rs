//! # Configuration
//!
//! Explicit configuration value objects built once at startup and passed by
//! reference to whatever needs them. Nothing below the CLI layer reads the
//! process environment on its own.
//!
//! Loading goes through a lookup function so callers (and tests) can supply
//! values from anywhere; [`JiraSettings::from_env`] and
//! [`usernames_from_env`] are thin wrappers over `std::env::var`.

use std::env;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::consts::{
  DEFAULT_EPIC_LINK_FIELD, DEFAULT_PROGRAM_INCREMENT, DEFAULT_PROGRAM_INCREMENT_FIELD, DEFAULT_STORY_POINTS_FIELD,
  DEFAULT_TARGET_STATUS, ENV_JIRA_API_TOKEN, ENV_JIRA_URL, ENV_JIRA_USERNAME, ENV_USERNAMES,
};
use crate::url::normalize_base_url;

/// Errors raised while assembling configuration
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Please set the {0} environment variable.")]
  MissingVar(&'static str),
  #[error("The {0} environment variable does not contain any usernames.")]
  EmptyUserList(&'static str),
  #[error("Invalid Jira URL in {var}: {reason}")]
  InvalidUrl { var: &'static str, reason: String },
}

/// Load a `.env` file from the working directory if one exists.
///
/// Values already present in the environment win over the file.
pub fn load_dotenv() {
  match dotenvy::dotenv() {
    Ok(path) => debug!("Loaded environment from {}", path.display()),
    Err(err) if err.not_found() => debug!("No .env file found"),
    Err(err) => tracing::warn!("Ignoring unreadable .env file: {err}"),
  }
}

/// Connection settings for the tracker
#[derive(Clone, PartialEq, Eq)]
pub struct JiraSettings {
  /// Normalized base URL without trailing slash
  pub base_url: String,
  pub username: String,
  pub api_token: String,
}

impl fmt::Debug for JiraSettings {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("JiraSettings")
      .field("base_url", &self.base_url)
      .field("username", &self.username)
      .field("api_token", &"<redacted>")
      .finish()
  }
}

impl JiraSettings {
  /// Read `JIRA_URL`, `JIRA_USERNAME` and `JIRA_API_TOKEN` from the process
  /// environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build settings from an arbitrary key lookup.
  ///
  /// Blank values count as missing.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let required = |var: &'static str| {
      lookup(var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar(var))
    };

    let raw_url = required(ENV_JIRA_URL)?;
    let username = required(ENV_JIRA_USERNAME)?;
    let api_token = required(ENV_JIRA_API_TOKEN)?;

    let base_url = normalize_base_url(&raw_url).map_err(|err| ConfigError::InvalidUrl {
      var: ENV_JIRA_URL,
      reason: err.to_string(),
    })?;

    Ok(Self {
      base_url,
      username,
      api_token,
    })
  }
}

/// Split a comma-separated user list, trimming entries and dropping blanks.
pub fn parse_usernames(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .map(str::to_string)
    .collect()
}

/// Read the `USERNAMES` list from the process environment.
pub fn usernames_from_env() -> Result<Vec<String>, ConfigError> {
  usernames_from_lookup(|key| env::var(key).ok())
}

/// Read the user list through an arbitrary key lookup.
pub fn usernames_from_lookup<F>(lookup: F) -> Result<Vec<String>, ConfigError>
where
  F: Fn(&str) -> Option<String>,
{
  let raw = lookup(ENV_USERNAMES).ok_or(ConfigError::MissingVar(ENV_USERNAMES))?;
  let usernames = parse_usernames(&raw);
  if usernames.is_empty() {
    return Err(ConfigError::EmptyUserList(ENV_USERNAMES));
  }
  Ok(usernames)
}

/// Names of the tracker fields the queries and aggregation rely on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
  /// Field id holding story points, e.g. `customfield_10049`
  pub story_points: String,
  /// JQL name of the Program Increment dropdown
  pub program_increment: String,
  /// JQL name of the epic link field
  pub epic_link: String,
}

impl Default for FieldNames {
  fn default() -> Self {
    Self {
      story_points: DEFAULT_STORY_POINTS_FIELD.to_string(),
      program_increment: DEFAULT_PROGRAM_INCREMENT_FIELD.to_string(),
      epic_link: DEFAULT_EPIC_LINK_FIELD.to_string(),
    }
  }
}

/// Everything a reporting run needs, assembled once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
  pub jira: JiraSettings,
  pub usernames: Vec<String>,
  /// Program Increment label, e.g. `PI-10`
  pub program_increment: String,
  /// Status whose transitions are listed per issue
  pub target_status: String,
  pub fields: FieldNames,
}

impl ReportConfig {
  /// Combine connection settings and a user list with the default report
  /// parameters.
  pub fn new(jira: JiraSettings, usernames: Vec<String>) -> Self {
    Self {
      jira,
      usernames,
      program_increment: DEFAULT_PROGRAM_INCREMENT.to_string(),
      target_status: DEFAULT_TARGET_STATUS.to_string(),
      fields: FieldNames::default(),
    }
  }

  /// Read connection settings and the user list from the process
  /// environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Load connection settings and the user list through one lookup.
  ///
  /// Tracker settings are checked first so a missing credential is reported
  /// even when the user list is also absent.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let jira = JiraSettings::from_lookup(&lookup)?;
    let usernames = usernames_from_lookup(&lookup)?;
    Ok(Self::new(jira, usernames))
  }

  /// Override the Program Increment label
  pub fn with_program_increment(mut self, pi: impl Into<String>) -> Self {
    self.program_increment = pi.into();
    self
  }

  /// Override the status whose transitions are reported
  pub fn with_target_status(mut self, status: impl Into<String>) -> Self {
    self.target_status = status.into();
    self
  }

  /// Override the tracker field names
  pub fn with_fields(mut self, fields: FieldNames) -> Self {
    self.fields = fields;
    self
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use tally_test_utils::EnvVarGuard;

  use super::*;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| map.get(key).cloned()
  }

  fn full_env() -> Vec<(&'static str, &'static str)> {
    vec![
      (ENV_JIRA_URL, "company.atlassian.net/"),
      (ENV_JIRA_USERNAME, "bot@example.com"),
      (ENV_JIRA_API_TOKEN, "secret-token"),
      (ENV_USERNAMES, "alice, bob,,carol "),
    ]
  }

  #[test]
  fn test_jira_settings_from_lookup() {
    let settings = JiraSettings::from_lookup(lookup_from(&full_env())).unwrap();
    assert_eq!(settings.base_url, "https://company.atlassian.net");
    assert_eq!(settings.username, "bot@example.com");
    assert_eq!(settings.api_token, "secret-token");
  }

  #[test]
  fn test_jira_settings_missing_token() {
    let env: Vec<_> = full_env().into_iter().filter(|(k, _)| *k != ENV_JIRA_API_TOKEN).collect();
    let err = JiraSettings::from_lookup(lookup_from(&env)).unwrap_err();
    assert!(matches!(err, ConfigError::MissingVar(ENV_JIRA_API_TOKEN)));
    assert!(err.to_string().contains("JIRA_API_TOKEN"));
  }

  #[test]
  fn test_jira_settings_blank_value_is_missing() {
    let mut env = full_env();
    env[1] = (ENV_JIRA_USERNAME, "   ");
    let err = JiraSettings::from_lookup(lookup_from(&env)).unwrap_err();
    assert!(matches!(err, ConfigError::MissingVar(ENV_JIRA_USERNAME)));
  }

  #[test]
  fn test_jira_settings_debug_redacts_token() {
    let settings = JiraSettings::from_lookup(lookup_from(&full_env())).unwrap();
    let debug = format!("{settings:?}");
    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("<redacted>"));
  }

  #[test]
  fn test_parse_usernames_trims_and_drops_blanks() {
    assert_eq!(parse_usernames("alice, bob,,carol "), vec!["alice", "bob", "carol"]);
    assert!(parse_usernames(" , ,").is_empty());
  }

  #[test]
  fn test_usernames_missing_and_empty() {
    let err = usernames_from_lookup(lookup_from(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingVar(ENV_USERNAMES)));

    let err = usernames_from_lookup(lookup_from(&[(ENV_USERNAMES, " , ")])).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyUserList(ENV_USERNAMES)));
  }

  #[test]
  fn test_report_config_defaults() {
    let config = ReportConfig::from_lookup(lookup_from(&full_env())).unwrap();
    assert_eq!(config.usernames, vec!["alice", "bob", "carol"]);
    assert_eq!(config.program_increment, "PI-10");
    assert_eq!(config.target_status, "In Development");
    assert_eq!(config.fields.story_points, "customfield_10049");
    assert_eq!(config.fields.program_increment, "Program Increment (PI)[Dropdown]");
    assert_eq!(config.fields.epic_link, "Epic Link");
  }

  #[test]
  fn test_report_config_reports_credentials_before_users() {
    let err = ReportConfig::from_lookup(lookup_from(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingVar(ENV_JIRA_URL)));
  }

  #[test]
  fn test_report_config_overrides() {
    let config = ReportConfig::from_lookup(lookup_from(&full_env()))
      .unwrap()
      .with_program_increment("PI-11")
      .with_target_status("In Review");
    assert_eq!(config.program_increment, "PI-11");
    assert_eq!(config.target_status, "In Review");
  }

  #[test]
  fn test_from_env_reads_process_environment() {
    let guard = EnvVarGuard::new(&[ENV_JIRA_URL, ENV_JIRA_USERNAME, ENV_JIRA_API_TOKEN, ENV_USERNAMES]);
    guard.set(ENV_JIRA_URL, "https://jira.example.com");
    guard.set(ENV_JIRA_USERNAME, "bot");
    guard.set(ENV_JIRA_API_TOKEN, "token");
    guard.remove(ENV_USERNAMES);

    let settings = JiraSettings::from_env().unwrap();
    assert_eq!(settings.base_url, "https://jira.example.com");

    assert!(matches!(
      usernames_from_env().unwrap_err(),
      ConfigError::MissingVar(ENV_USERNAMES)
    ));

    guard.set(ENV_USERNAMES, "dave");
    assert_eq!(usernames_from_env().unwrap(), vec!["dave"]);
  }

  #[test]
  fn test_invalid_url_is_reported() {
    let mut env = full_env();
    env[0] = (ENV_JIRA_URL, "https://exa mple.com");
    let err = JiraSettings::from_lookup(lookup_from(&env)).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { .. }));
  }
}
