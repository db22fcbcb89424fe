//! Error taxonomy for pkgswap operations.
//!
//! Every failing filesystem step surfaces as a [`SwapError`] carrying the path
//! it was working on. Operations stop at the first error; nothing is rolled back.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Broad classification of a [`SwapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotInitialized,
  AlreadyExists,
  GuardedTarget,
  NotFound,
  ParseFailure,
  IoFailure,
}

/// Whether a caller can reasonably recover from an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  /// Abort any higher-level workflow.
  Fatal,
  /// May be handled by the caller, e.g. retried with `force`.
  Recoverable,
}

#[derive(Debug, Error)]
pub enum SwapError {
  /// The project has no master file or the live manifest is not linked.
  #[error("project at {} is not initialized, run `pkgswap init` first", root.display())]
  NotInitialized { root: PathBuf },

  /// Destination exists and `force` was not requested.
  #[error("file already exists: {} (use force to overwrite)", path.display())]
  AlreadyExists { path: PathBuf },

  /// Blacklist edits are never applied to the master file.
  #[error("refusing to modify master manifest {}", path.display())]
  GuardedTarget { path: PathBuf },

  #[error("file not found: {}", path.display())]
  NotFound { path: PathBuf },

  /// No ancestor of the start directory contains a manifest.
  #[error("no package.json found in {} or any parent directory", start.display())]
  RootNotFound { start: PathBuf },

  /// The variant name sanitizes to an empty or reserved string.
  #[error("invalid variant name: {name:?}")]
  InvalidName { name: String },

  #[error("failed to parse {}: {message}", path.display())]
  Parse { path: PathBuf, message: String },

  #[error("failed to serialize {}: {source}", path.display())]
  Serialize { path: PathBuf, source: serde_json::Error },

  #[error("failed to {op} {}: {source}", path.display())]
  Io {
    op: &'static str,
    path: PathBuf,
    source: io::Error,
  },
}

impl SwapError {
  /// Wraps an I/O error, mapping `NotFound` onto [`SwapError::NotFound`].
  pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
    let path = path.into();
    if source.kind() == io::ErrorKind::NotFound {
      return SwapError::NotFound { path };
    }
    SwapError::Io { op, path, source }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      SwapError::NotInitialized { .. } => ErrorKind::NotInitialized,
      SwapError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
      SwapError::GuardedTarget { .. } => ErrorKind::GuardedTarget,
      SwapError::NotFound { .. } | SwapError::RootNotFound { .. } => ErrorKind::NotFound,
      SwapError::InvalidName { .. } | SwapError::Parse { .. } => ErrorKind::ParseFailure,
      SwapError::Serialize { .. } | SwapError::Io { .. } => ErrorKind::IoFailure,
    }
  }

  pub fn severity(&self) -> Severity {
    match self.kind() {
      ErrorKind::AlreadyExists | ErrorKind::NotFound => Severity::Recoverable,
      _ => Severity::Fatal,
    }
  }
}

pub type Result<T, E = SwapError> = std::result::Result<T, E>;
