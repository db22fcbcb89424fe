mod blacklist;
mod create;
mod enable;
mod init;
mod reconcile;
mod status;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::debug;

use pkgswap_lib::PkgSwap;
use pkgswap_lib::swap::SwapState;

pub use blacklist::{cmd_blacklist, cmd_unblacklist};
pub use create::{CreateArgs, cmd_create};
pub use enable::{cmd_disable, cmd_enable};
pub use init::cmd_init;
pub use reconcile::cmd_reconcile;
pub use status::{cmd_list, cmd_status};

/// Selects the variant a command edits. Defaults to the enabled variant.
#[derive(Debug, Args)]
pub struct TargetArgs {
  /// Variant name
  #[arg(short = 'n', long = "variant", value_name = "NAME", conflicts_with = "dest")]
  pub name: Option<String>,

  /// Path to the variant file
  #[arg(long)]
  pub dest: Option<PathBuf>,
}

/// Opens the project containing `root`, or the one found from the
/// environment when no root was given.
pub fn open_project(root: Option<&Path>) -> Result<PkgSwap> {
  let swap = match root {
    Some(root) => PkgSwap::open(root),
    None => PkgSwap::discover(),
  }
  .context("Failed to locate project")?;
  debug!(root = %swap.root().display(), "opened project");
  Ok(swap)
}

/// Resolves a user-supplied path against the current directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
  if path.is_absolute() {
    return Ok(path.to_path_buf());
  }
  let cwd = std::env::current_dir().context("Failed to read current directory")?;
  Ok(cwd.join(path))
}

/// Treats `variant` as a path when it looks like one, as a name otherwise.
pub fn variant_path(swap: &PkgSwap, variant: &str) -> Result<PathBuf> {
  if variant.ends_with(".json") || variant.contains(std::path::MAIN_SEPARATOR) || variant.contains('/') {
    return absolute(Path::new(variant));
  }
  Ok(swap.paths().variant(variant)?)
}

/// The variant file a blacklist/reconcile command operates on.
pub fn target_path(swap: &PkgSwap, target: &TargetArgs) -> Result<PathBuf> {
  if let Some(dest) = &target.dest {
    return absolute(dest);
  }
  if let Some(name) = &target.name {
    return variant_path(swap, name);
  }
  match swap.status()? {
    SwapState::InitializedOnVariant { path, .. } => Ok(path),
    SwapState::InitializedOnMaster => bail!("master is enabled; pass --variant or --dest to pick a variant"),
    SwapState::Uninitialized => bail!("project is not initialized, run `pkgswap init` first"),
  }
}
