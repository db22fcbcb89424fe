//! The live-manifest link.
//!
//! On unix and windows the live manifest is a symlink to the active variant.
//! Windows refuses symlink creation without the right privilege; in that
//! case a pointer file in the same directory records the target instead, and
//! [`read_link`] consults it when no symlink is present.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SwapError};

/// Points `link` at `target`. `link` must not exist.
pub fn create_link(target: &Path, link: &Path) -> Result<()> {
  match symlink_file(target, link) {
    Ok(()) => {
      debug!(link = %link.display(), target = %target.display(), "created symlink");
      Ok(())
    }
    Err(e) if symlink_unsupported(&e) => pointer::write(target, link),
    Err(e) => Err(SwapError::io("symlink", link, e)),
  }
}

/// The target of `link`, or `None` when it is a plain file or missing.
///
/// Relative symlink targets are resolved against the link's directory.
pub fn read_link(link: &Path) -> Result<Option<PathBuf>> {
  match fs::symlink_metadata(link) {
    Ok(meta) if meta.file_type().is_symlink() => {
      let target = fs::read_link(link).map_err(|e| SwapError::io("read link", link, e))?;
      if target.is_absolute() {
        return Ok(Some(target));
      }
      let base = link.parent().unwrap_or_else(|| Path::new("."));
      Ok(Some(base.join(target)))
    }
    Ok(_) => Ok(None),
    Err(e) if e.kind() == io::ErrorKind::NotFound => pointer::read(link),
    Err(e) => Err(SwapError::io("stat", link, e)),
  }
}

/// True when `link` is a symlink or a recorded pointer.
pub fn is_link(link: &Path) -> Result<bool> {
  Ok(read_link(link)?.is_some())
}

/// Removes the live entry at `link`, whatever it is. Missing is not an error.
pub fn remove_link(link: &Path) -> Result<()> {
  match fs::remove_file(link) {
    Ok(()) => debug!(link = %link.display(), "removed live manifest entry"),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
    Err(e) => return Err(SwapError::io("remove", link, e)),
  }
  pointer::remove(link)
}

/// ERROR_PRIVILEGE_NOT_HELD
const WINDOWS_PRIVILEGE_NOT_HELD: i32 = 1314;

fn symlink_unsupported(e: &io::Error) -> bool {
  cfg!(windows)
    && (e.kind() == io::ErrorKind::PermissionDenied || e.raw_os_error() == Some(WINDOWS_PRIVILEGE_NOT_HELD))
}

#[cfg(unix)]
fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
  std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
  std::os::windows::fs::symlink_file(target, link)
}

mod pointer {
  use std::fs;
  use std::io;
  use std::path::{Path, PathBuf};

  use tracing::{debug, warn};

  use crate::consts::POINTER_FILENAME;
  use crate::error::{Result, SwapError};

  fn pointer_path(link: &Path) -> PathBuf {
    link.parent().unwrap_or_else(|| Path::new(".")).join(POINTER_FILENAME)
  }

  pub fn write(target: &Path, link: &Path) -> Result<()> {
    let path = pointer_path(link);
    warn!(link = %link.display(), "symlinks unavailable, recording active variant in pointer file");
    fs::write(&path, target.to_string_lossy().as_bytes()).map_err(|e| SwapError::io("write", path.clone(), e))?;
    debug!(pointer = %path.display(), target = %target.display(), "wrote pointer file");
    Ok(())
  }

  pub fn read(link: &Path) -> Result<Option<PathBuf>> {
    let path = pointer_path(link);
    match fs::read_to_string(&path) {
      Ok(content) if !content.trim().is_empty() => Ok(Some(PathBuf::from(content.trim()))),
      Ok(_) => Ok(None),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(SwapError::io("read", path, e)),
    }
  }

  pub fn remove(link: &Path) -> Result<()> {
    let path = pointer_path(link);
    match fs::remove_file(&path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(SwapError::io("remove", path, e)),
    }
  }
}
