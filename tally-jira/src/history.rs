//! # Status History Extraction
//!
//! Flattens an issue changelog into one [`StatusHistoryRecord`] per changed
//! field, keeping each item paired with the author and date of the event that
//! contains it.

use chrono::{DateTime, NaiveDate};
use tracing::warn;

use crate::models::{JiraChangelog, JiraHistory};

/// Timestamp layout Jira uses for changelog events
const CHANGELOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// One field transition taken from an issue changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistoryRecord {
  /// Previous value, empty when the field was unset
  pub from_status: String,
  /// New value, empty when the field was cleared
  pub to_status: String,
  /// Display name of whoever made the change, empty if unknown
  pub author: String,
  /// Day the change happened; `None` when the timestamp is missing or unreadable
  pub created: Option<NaiveDate>,
}

impl StatusHistoryRecord {
  /// Whether this transition enters or leaves `status`
  pub fn touches_status(&self, status: &str) -> bool {
    self.from_status == status || self.to_status == status
  }

  /// The change date as `YYYY-MM-DD`, empty when unknown
  pub fn created_label(&self) -> String {
    self.created.map(|date| date.to_string()).unwrap_or_default()
  }
}

/// Convert a changelog into records, one per item, in source order.
///
/// No filtering or deduplication happens here.
pub fn extract_status_history(changelog: &JiraChangelog) -> Vec<StatusHistoryRecord> {
  changelog.histories.iter().flat_map(records_for_event).collect()
}

fn records_for_event(history: &JiraHistory) -> impl Iterator<Item = StatusHistoryRecord> + '_ {
  let author = history
    .author
    .as_ref()
    .and_then(|a| a.display_name.clone())
    .unwrap_or_default();
  let created = history.created.as_deref().and_then(parse_created_date);

  history.items.iter().map(move |item| StatusHistoryRecord {
    from_status: item.from_value.clone().unwrap_or_default(),
    to_status: item.to_value.clone().unwrap_or_default(),
    author: author.clone(),
    created,
  })
}

/// Parse a changelog timestamp down to its calendar date.
///
/// Empty input yields `None` silently; anything else that does not match the
/// Jira layout yields `None` with a warning.
pub fn parse_created_date(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  match DateTime::parse_from_str(raw, CHANGELOG_TIMESTAMP_FORMAT) {
    Ok(timestamp) => Some(timestamp.date_naive()),
    Err(err) => {
      warn!("Ignoring malformed changelog timestamp '{raw}': {err}");
      None
    }
  }
}

/// Keep only the records that enter or leave `status`
pub fn filter_by_status<'a>(
  records: &'a [StatusHistoryRecord],
  status: &'a str,
) -> impl Iterator<Item = &'a StatusHistoryRecord> + 'a {
  records.iter().filter(move |record| record.touches_status(status))
}
