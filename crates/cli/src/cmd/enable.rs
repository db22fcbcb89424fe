//! Implementation of the `pkgswap enable` and `pkgswap disable` commands.

use std::path::Path;

use anyhow::{Context, Result};

use pkgswap_lib::consts::MASTER_LABEL;

use super::{open_project, variant_path};
use crate::output::print_success;

/// Points `package.json` at a variant. `master` (or `package`) disables.
pub fn cmd_enable(root: Option<&Path>, variant: &str) -> Result<()> {
  if variant == "master" || variant == MASTER_LABEL {
    return cmd_disable(root);
  }

  let swap = open_project(root)?;
  let path = variant_path(&swap, variant)?;
  let state = swap
    .enable(&path)
    .with_context(|| format!("Failed to enable '{}'", variant))?;

  print_success(&format!("{}", state));
  Ok(())
}

pub fn cmd_disable(root: Option<&Path>) -> Result<()> {
  let swap = open_project(root)?;
  let state = swap.disable().context("Failed to enable master")?;
  print_success(&format!("{}", state));
  Ok(())
}
