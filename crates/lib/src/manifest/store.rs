//! Reading and writing manifest files.
//!
//! Writes go to a temp file in the destination directory and are renamed
//! into place, so a reader never sees a half-written manifest.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use super::types::Manifest;
use crate::error::{Result, SwapError};

/// Reads and parses the manifest at `path`, following symlinks.
pub fn read_manifest(path: &Path) -> Result<Manifest> {
  let content = fs::read_to_string(path).map_err(|e| SwapError::io("read", path, e))?;
  let manifest: Manifest = serde_json::from_str(&content).map_err(|e| SwapError::Parse {
    path: path.to_path_buf(),
    message: e.to_string(),
  })?;
  Ok(manifest)
}

/// Serializes `manifest` to `path` with two-space indentation and a trailing newline.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
  let mut content = serde_json::to_string_pretty(manifest).map_err(|e| SwapError::Serialize {
    path: path.to_path_buf(),
    source: e,
  })?;
  content.push('\n');

  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  let mut temp = NamedTempFile::new_in(dir).map_err(|e| SwapError::io("create temp file in", dir, e))?;
  temp
    .write_all(content.as_bytes())
    .map_err(|e| SwapError::io("write", temp.path().to_path_buf(), e))?;
  // temp files are created 0600; keep the replaced file's mode
  if let Ok(meta) = fs::metadata(path) {
    temp
      .as_file()
      .set_permissions(meta.permissions())
      .map_err(|e| SwapError::io("set permissions on", temp.path().to_path_buf(), e))?;
  }
  temp
    .persist(path)
    .map_err(|e| SwapError::io("replace", path, e.error))?;

  debug!(path = %path.display(), "wrote manifest");
  Ok(())
}

/// Byte-for-byte copy of a manifest file.
pub fn copy_manifest(from: &Path, to: &Path) -> Result<()> {
  if !manifest_exists(from) {
    return Err(SwapError::NotFound {
      path: from.to_path_buf(),
    });
  }
  fs::copy(from, to).map_err(|e| SwapError::io("copy to", to, e))?;
  debug!(from = %from.display(), to = %to.display(), "copied manifest");
  Ok(())
}

/// True when `path` resolves to a regular file.
pub fn manifest_exists(path: &Path) -> bool {
  fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}
