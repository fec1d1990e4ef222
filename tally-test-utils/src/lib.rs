//! Test utilities shared across the tally workspace
//!
//! This crate provides common testing infrastructure including:
//! - Process environment isolation ([`EnvVarGuard`])
//! - Jira REST payload fixtures and mock-server helpers ([`jira`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod jira;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use jira::{IssueFixture, changelog_json, history_json, issue_json, search_page_json};
