//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

/// Isolated project directory holding a `package.json`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create a project whose `package.json` holds `manifest`.
  pub fn with_manifest(manifest: &Value) -> Self {
    let temp = TempDir::new().unwrap();
    let content = serde_json::to_string_pretty(manifest).unwrap();
    std::fs::write(temp.path().join("package.json"), content).unwrap();
    Self { temp }
  }

  /// Project root, canonicalized.
  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  pub fn live_path(&self) -> PathBuf {
    self.root().join("package.json")
  }

  pub fn master_path(&self) -> PathBuf {
    self.root().join(".pkgswap.package.json")
  }

  pub fn variant_path(&self, name: &str) -> PathBuf {
    self.root().join(format!(".pkgswap.{}.json", name))
  }

  /// Parse a JSON file relative to the root.
  pub fn read_json(&self, path: &Path) -> Value {
    let content = std::fs::read_to_string(self.root().join(path))
      .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content).unwrap()
  }

  /// Overwrite a JSON file relative to the root.
  pub fn write_json(&self, path: &Path, value: &Value) {
    std::fs::write(self.root().join(path), serde_json::to_string_pretty(value).unwrap()).unwrap();
  }

  /// Where the live manifest currently points.
  pub fn live_target(&self) -> PathBuf {
    std::fs::read_link(self.live_path()).unwrap()
  }

  /// Get a pre-configured Command for the pkgswap binary.
  ///
  /// Runs inside the project root with `PKGSWAP_ROOT` cleared so the
  /// search starts from the working directory.
  pub fn pkgswap_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("pkgswap");
    cmd.current_dir(self.root());
    cmd.env_remove("PKGSWAP_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// Runs `pkgswap init` and asserts success.
  pub fn init(&self) {
    self.pkgswap_cmd().arg("init").assert().success();
  }
}
