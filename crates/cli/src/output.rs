//! CLI output formatting utilities.
//!
//! Colored status lines on stdout, errors and warnings on stderr, and a JSON
//! mode for the read-only commands.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
  pub const ADD: &str = "+";
  pub const MODIFY: &str = "~";
  pub const REMOVE: &str = "-";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

/// One line of a change listing, e.g. `  + dependencies/a 1.0.0`.
pub fn print_change(symbol: &str, message: &str) {
  let symbol = match symbol {
    symbols::ADD => symbol.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
    symbols::REMOVE => symbol.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
    _ => symbol.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string(),
  };
  println!("  {} {}", symbol, message);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Joins source sections for display, `-` when there are none.
pub fn format_sources<I, S>(sources: I) -> String
where
  I: IntoIterator<Item = S>,
  S: std::fmt::Display,
{
  let joined = sources.into_iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", ");
  if joined.is_empty() { "-".to_string() } else { joined }
}
