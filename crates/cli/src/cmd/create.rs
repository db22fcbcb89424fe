//! Implementation of the `pkgswap create` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pkgswap_lib::swap::CreateOptions;

use super::{absolute, open_project};
use crate::output::{format_sources, print_stat, print_success, symbols};

pub struct CreateArgs {
  pub force: bool,
  pub enable: bool,
  pub blacklist: Vec<String>,
  pub dest: Option<PathBuf>,
}

pub fn cmd_create(root: Option<&Path>, name: &str, args: CreateArgs) -> Result<()> {
  let swap = open_project(root)?;

  let dest = args.dest.as_deref().map(absolute).transpose()?;
  let options = CreateOptions {
    force: args.force,
    enable: args.enable,
    dest,
    ..Default::default()
  }
  .with_blacklist(&args.blacklist);

  let created = swap
    .create(name, &options)
    .with_context(|| format!("Failed to create variant '{}'", name))?;

  print_success(&format!("Created variant {}", name));
  print_stat("Path", &created.path.display().to_string());
  for entry in &created.blacklist {
    println!(
      "  {} {} ({})",
      symbols::REMOVE,
      entry.name,
      format_sources(&entry.sources)
    );
  }
  if created.enabled {
    print_success(&format!("{} {} enabled", symbols::ARROW, name));
  }
  Ok(())
}
