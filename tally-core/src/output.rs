//! # Output Formatting
//!
//! Provides formatted output functions with colors, emojis, and consistent
//! styling for user-facing messages and report text.

use owo_colors::{OwoColorize, Stream};
use {clap, emojis};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode as the process-wide color override
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      // Leave detection to owo-colors
      ColorMode::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Format a warning line without printing it
pub fn format_warning(message: &str) -> String {
  let warning = get_emoji_or_default("warning", "⚠");
  format!(
    "{} {}",
    warning.if_supports_color(Stream::Stdout, |w| w.yellow().bold().to_string()),
    message
  )
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!(
    "{} {}",
    check.if_supports_color(Stream::Stdout, |c| c.green().bold().to_string()),
    message
  );
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!(
    "{} {}",
    cross.if_supports_color(Stream::Stderr, |c| c.red().bold().to_string()),
    message
  );
}

/// Print a warning message
pub fn print_warning(message: &str) {
  println!("{}", format_warning(message));
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!(
    "{} {}",
    info.if_supports_color(Stream::Stdout, |i| i.blue().bold().to_string()),
    message
  );
}

/// Print a section header
pub fn print_header(header: &str) {
  println!(
    "\n{}",
    header.if_supports_color(Stream::Stdout, |h| h.blue().bold().to_string())
  );
}

/// Format a story-point amount.
///
/// Whole numbers print without a fractional part, everything else keeps up
/// to two decimals with trailing zeros removed.
pub fn format_points(points: f64) -> String {
  if points.fract() == 0.0 && points.abs() < 1e15 {
    format!("{}", points as i64)
  } else {
    let formatted = format!("{points:.2}");
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
  }
}
