use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Which manifest the live `package.json` currently resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SwapState {
  /// No master file, or the live manifest is not a link.
  Uninitialized,
  InitializedOnMaster,
  /// `name` is the scheme name of the target, or its full path when the
  /// target lives outside the naming scheme.
  InitializedOnVariant { name: String, path: PathBuf },
}

impl SwapState {
  pub fn is_initialized(&self) -> bool {
    !matches!(self, SwapState::Uninitialized)
  }
}

impl fmt::Display for SwapState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SwapState::Uninitialized => write!(f, "not initialized"),
      SwapState::InitializedOnMaster => write!(f, "master enabled"),
      SwapState::InitializedOnVariant { name, .. } => write!(f, "variant {name} enabled"),
    }
  }
}

/// A variant file found in the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
  pub name: String,
  pub path: PathBuf,
  pub active: bool,
}
