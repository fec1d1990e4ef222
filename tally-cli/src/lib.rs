//! # Tally CLI Library
//!
//! Command handlers, per-user story-point aggregation, and the terminal bar
//! chart behind the `tally` binary.

pub mod chart;
pub mod cli;
pub mod report;
