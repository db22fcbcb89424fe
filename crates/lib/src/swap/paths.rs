use std::path::{Path, PathBuf};

use crate::consts::{APP_NAME, MANIFEST_FILENAME, MASTER_LABEL};
use crate::error::{Result, SwapError};

/// File locations derived from a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPaths {
  root: PathBuf,
}

impl SwapPaths {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// The manifest the build tooling reads (`package.json`).
  pub fn live(&self) -> PathBuf {
    self.root.join(MANIFEST_FILENAME)
  }

  /// The master variant (`.pkgswap.package.json`).
  pub fn master(&self) -> PathBuf {
    self.root.join(variant_filename(MASTER_LABEL))
  }

  /// The default location of a named variant (`.pkgswap.<name>.json`).
  ///
  /// The name is sanitized first; names that sanitize to nothing, or to the
  /// master label, are rejected.
  pub fn variant(&self, name: &str) -> Result<PathBuf> {
    let sanitized = sanitize_name(name)?;
    Ok(self.root.join(variant_filename(&sanitized)))
  }

  /// Relative paths are taken against the project root.
  pub fn resolve(&self, path: &Path) -> PathBuf {
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.root.join(path)
    }
  }

  /// The variant name encoded in `path`'s file name, if it follows the scheme.
  pub fn name_of(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let prefix = format!(".{APP_NAME}.");
    let name = file_name.strip_prefix(&prefix)?.strip_suffix(".json")?;
    if name.is_empty() {
      return None;
    }
    Some(name.to_string())
  }
}

fn variant_filename(name: &str) -> String {
  format!(".{APP_NAME}.{name}.json")
}

/// Reduces a user-supplied name to a filesystem-safe one.
pub fn sanitize_name(name: &str) -> Result<String> {
  let sanitized = sanitize_filename::sanitize(name.trim());
  if sanitized.is_empty() || sanitized == MASTER_LABEL {
    return Err(SwapError::InvalidName { name: name.to_string() });
  }
  Ok(sanitized)
}
