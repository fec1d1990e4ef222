//! # Tally Core Library
//!
//! Shared building blocks for the tally workspace: the configuration value
//! objects read once at startup, console output helpers, URL normalization for
//! the tracker host, and the constants every crate agrees on.

pub mod config;
pub mod consts;
pub mod output;
pub mod url;

pub use config::{ConfigError, FieldNames, JiraSettings, ReportConfig, parse_usernames};
pub use output::{ColorMode, format_points, print_error, print_header, print_info, print_success, print_warning};
