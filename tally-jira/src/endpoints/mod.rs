//! # Jira API Endpoints
//!
//! Organized endpoint implementations for the Jira API resources tally reads:
//! single issues, JQL search, and groups with their members.

pub mod issues;
pub mod search;
pub mod users;
