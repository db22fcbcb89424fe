use std::path::PathBuf;

use crate::blacklist::split_names;

/// Options for [`PkgSwap::init`](super::PkgSwap::init).
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
  /// Overwrite an existing master file when the live manifest is a plain file.
  pub force: bool,
}

/// Options for [`PkgSwap::create`](super::PkgSwap::create).
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
  /// Overwrite the destination if it exists.
  pub force: bool,
  /// Enable the new variant once written.
  pub enable: bool,
  /// Packages to exclude from the new variant.
  pub blacklist: Vec<String>,
  /// Destination override; defaults to `.pkgswap.<name>.json` in the root.
  pub dest: Option<PathBuf>,
}

impl CreateOptions {
  /// Sets the blacklist from repeated or comma-separated names.
  pub fn with_blacklist<S: AsRef<str>>(mut self, names: &[S]) -> Self {
    self.blacklist = split_names(names);
    self
  }
}

/// Options for [`PkgSwap::unblacklist`](super::PkgSwap::unblacklist).
#[derive(Debug, Clone, Default)]
pub struct UnblacklistOptions {
  /// Copy each package's spec back from master into the sections it was
  /// removed from.
  pub restore: bool,
}
