//! Implementation of the `pkgswap blacklist` and `pkgswap unblacklist` commands.

use std::path::Path;

use anyhow::{Context, Result};

use pkgswap_lib::swap::UnblacklistOptions;

use super::{TargetArgs, open_project, target_path};
use crate::output::{format_sources, print_info, print_stat, print_success, symbols};

pub fn cmd_blacklist(root: Option<&Path>, packages: &[String], target: &TargetArgs) -> Result<()> {
  let swap = open_project(root)?;
  let dest = target_path(&swap, target)?;

  let entries = swap
    .blacklist(packages, &dest)
    .with_context(|| format!("Failed to update blacklist of {}", dest.display()))?;

  print_success("Blacklist updated");
  print_stat("Variant", &dest.display().to_string());
  for entry in &entries {
    println!(
      "  {} {} ({})",
      symbols::REMOVE,
      entry.name,
      format_sources(&entry.sources)
    );
  }
  Ok(())
}

pub fn cmd_unblacklist(root: Option<&Path>, packages: &[String], restore: bool, target: &TargetArgs) -> Result<()> {
  let swap = open_project(root)?;
  let dest = target_path(&swap, target)?;

  let removed = swap
    .unblacklist(packages, &dest, &UnblacklistOptions { restore })
    .with_context(|| format!("Failed to update blacklist of {}", dest.display()))?;

  if removed.is_empty() {
    print_info("No matching blacklist entries");
    return Ok(());
  }

  print_success(&format!("Removed {} blacklist entr{}", removed.len(), if removed.len() == 1 { "y" } else { "ies" }));
  for entry in &removed {
    let symbol = if restore { symbols::ADD } else { symbols::INFO };
    println!("  {} {}", symbol, entry.name);
  }
  if !restore {
    print_info("Packages were not restored; use --restore or `pkgswap reconcile` to bring them back");
  }
  Ok(())
}
