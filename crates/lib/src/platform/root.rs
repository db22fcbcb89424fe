use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::{MANIFEST_FILENAME, ROOT_ENV};
use crate::error::{Result, SwapError};

/// Directory the root search starts from.
///
/// `PKGSWAP_ROOT` when set and non-empty, the current directory otherwise.
pub fn start_dir() -> Result<PathBuf> {
  match env::var_os(ROOT_ENV) {
    Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
    _ => env::current_dir().map_err(|e| SwapError::io("read current directory", ".", e)),
  }
}

/// Walks upward from `start` to the nearest directory holding a manifest.
///
/// The manifest is checked with `lstat`, so a dangling live link still marks
/// the project root.
pub fn find_root(start: &Path) -> Result<PathBuf> {
  let start = dunce::canonicalize(start).map_err(|e| SwapError::io("resolve", start, e))?;

  for dir in start.ancestors() {
    if fs::symlink_metadata(dir.join(MANIFEST_FILENAME)).is_ok() {
      debug!(root = %dir.display(), "found project root");
      return Ok(dir.to_path_buf());
    }
  }

  Err(SwapError::RootNotFound { start })
}
