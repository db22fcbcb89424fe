//! Implementation of the `pkgswap init` command.

use std::path::Path;

use anyhow::{Context, Result};

use pkgswap_lib::swap::InitOptions;

use super::open_project;
use crate::output::{print_info, print_stat, print_success};

/// Moves `package.json` into the master file and links it back.
///
/// On an already initialized project this switches back to master.
pub fn cmd_init(root: Option<&Path>, force: bool) -> Result<()> {
  let swap = open_project(root)?;
  let was_initialized = swap.is_initialized()?;

  swap
    .init(&InitOptions { force })
    .context("Failed to initialize project")?;

  if was_initialized {
    print_info("Already initialized; master enabled.");
  } else {
    print_success("Initialized pkgswap project");
  }
  print_stat("Root", &swap.root().display().to_string());
  print_stat("Master", &swap.paths().master().display().to_string());
  Ok(())
}
