//! # Jira API Client
//!
//! Read-only Jira REST integration for tally: issue search, changelog
//! retrieval, group membership, and the issue query service the reports are
//! built on.

pub mod auth;
mod client;
pub mod consts;
mod endpoints;
pub mod history;
pub mod jql;
pub mod models;
pub mod service;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
pub use history::{StatusHistoryRecord, extract_status_history, filter_by_status};
// Re-export models
pub use models::{JiraAuth, JiraChangelog, JiraGroup, JiraHistory, JiraIssue, JiraIssueFields, JiraUser};
pub use service::{JiraIssueService, story_points, sum_story_points};
