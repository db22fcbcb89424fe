//! Implementation of the `pkgswap status` and `pkgswap list` commands.

use std::path::Path;

use anyhow::Result;

use pkgswap_lib::swap::SwapState;

use super::open_project;
use crate::output::{OutputFormat, print_info, print_json, print_stat, print_success, print_warning, symbols};

pub fn cmd_status(root: Option<&Path>, output: OutputFormat) -> Result<()> {
  let swap = open_project(root)?;
  let state = swap.status()?;

  if output.is_json() {
    let json = serde_json::json!({ "root": swap.root(), "master": swap.paths().master(), "status": state });
    return print_json(&json);
  }

  match &state {
    SwapState::Uninitialized => print_warning("Not initialized. Run 'pkgswap init' to start."),
    SwapState::InitializedOnMaster => print_success("Master enabled"),
    SwapState::InitializedOnVariant { name, .. } => print_success(&format!("Variant {} enabled", name)),
  }
  print_stat("Root", &swap.root().display().to_string());
  if let SwapState::InitializedOnVariant { path, .. } = &state {
    print_stat("Target", &path.display().to_string());
  }
  Ok(())
}

pub fn cmd_list(root: Option<&Path>, output: OutputFormat) -> Result<()> {
  let swap = open_project(root)?;
  let variants = swap.variants()?;

  if output.is_json() {
    return print_json(&variants);
  }

  if variants.is_empty() {
    print_info("No variants. Run 'pkgswap create <name>' to add one.");
    return Ok(());
  }

  for variant in &variants {
    let marker = if variant.active { symbols::ARROW } else { " " };
    println!("{} {}", marker, variant.name);
  }
  Ok(())
}
