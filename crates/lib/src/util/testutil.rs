//! Test utilities for pkgswap-lib.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;

use crate::consts::MANIFEST_FILENAME;
use crate::swap::PkgSwap;

/// A throwaway project whose `package.json` holds `manifest`.
pub fn temp_project(manifest: Value) -> (TempDir, PkgSwap) {
  let temp = TempDir::new().unwrap();
  let content = serde_json::to_string_pretty(&manifest).unwrap();
  fs::write(temp.path().join(MANIFEST_FILENAME), content).unwrap();
  let swap = PkgSwap::new(temp.path());
  (temp, swap)
}

/// Reads a JSON file, following symlinks.
pub fn read_json(path: &Path) -> Value {
  let content = fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
  serde_json::from_str(&content).unwrap()
}
