//! Implementation of the `pkgswap reconcile` command.
//!
//! Merges the dependency changes of a variant into master. Blacklisted
//! packages are never removed from master.

use std::path::Path;

use anyhow::{Context, Result};

use pkgswap_lib::reconcile::ChangeKind;

use super::{TargetArgs, open_project, target_path};
use crate::output::{print_change, print_info, print_success, symbols};

pub fn cmd_reconcile(root: Option<&Path>, target: &TargetArgs) -> Result<()> {
  let swap = open_project(root)?;
  let dest = target_path(&swap, target)?;

  let result = swap
    .reconcile_master(&dest)
    .with_context(|| format!("Failed to reconcile {} into master", dest.display()))?;

  if !result.has_changes() {
    print_info("Master is up to date");
    return Ok(());
  }

  print_success(&format!("Reconciled {} change(s) into master", result.changes.len()));
  for change in &result.changes {
    match &change.kind {
      ChangeKind::Added => print_change(
        symbols::ADD,
        &format!("{}/{} {}", change.section, change.name, change.spec),
      ),
      ChangeKind::Updated { from } => print_change(
        symbols::MODIFY,
        &format!("{}/{} {} {} {}", change.section, change.name, from, symbols::ARROW, change.spec),
      ),
    }
  }
  Ok(())
}
