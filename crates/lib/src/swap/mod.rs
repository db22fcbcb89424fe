//! The swap controller.
//!
//! Owns the on-disk state of a project: the master file, the variant files,
//! and the live `package.json` link choosing between them.
//!
//! # Layout
//!
//! ```text
//! <root>/
//! ├── package.json            # symlink to the enabled manifest once initialized
//! ├── .pkgswap.package.json   # master
//! └── .pkgswap.<name>.json    # variants
//! ```
//!
//! Each operation is a fixed sequence of filesystem steps that stops at the
//! first failure. Nothing is locked; callers serialize access to a project.

mod options;
mod paths;
mod state;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::blacklist::{entries_for, filter_packages, merge_entries, remove_entries, split_names};
use crate::error::{Result, SwapError};
use crate::manifest::{BlacklistEntry, Manifest, copy_manifest, manifest_exists, read_manifest, write_manifest};
use crate::platform::{self, link};
use crate::reconcile::{self, Reconciliation};

pub use options::{CreateOptions, InitOptions, UnblacklistOptions};
pub use paths::{SwapPaths, sanitize_name};
pub use state::{SwapState, Variant};

/// A newly written variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Created {
  pub path: PathBuf,
  /// Entries stored in the variant; empty when no blacklist was requested.
  pub blacklist: Vec<BlacklistEntry>,
  pub enabled: bool,
}

/// Controller for one project root.
#[derive(Debug, Clone)]
pub struct PkgSwap {
  paths: SwapPaths,
}

impl PkgSwap {
  /// Controller for a known root directory.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    let root = root.into();
    let root = dunce::canonicalize(&root).unwrap_or(root);
    Self {
      paths: SwapPaths::new(root),
    }
  }

  /// Finds the project root above `start`.
  pub fn open(start: &Path) -> Result<Self> {
    Ok(Self::new(platform::find_root(start)?))
  }

  /// Finds the project root above `PKGSWAP_ROOT` or the current directory.
  pub fn discover() -> Result<Self> {
    Self::open(&platform::start_dir()?)
  }

  pub fn paths(&self) -> &SwapPaths {
    &self.paths
  }

  pub fn root(&self) -> &Path {
    self.paths.root()
  }

  pub fn status(&self) -> Result<SwapState> {
    let master = self.paths.master();
    if !manifest_exists(&master) {
      return Ok(SwapState::Uninitialized);
    }

    let Some(target) = link::read_link(&self.paths.live())? else {
      return Ok(SwapState::Uninitialized);
    };

    if same_path(&target, &master) {
      return Ok(SwapState::InitializedOnMaster);
    }

    let name = SwapPaths::name_of(&target).unwrap_or_else(|| target.display().to_string());
    Ok(SwapState::InitializedOnVariant { name, path: target })
  }

  pub fn is_initialized(&self) -> Result<bool> {
    Ok(self.status()?.is_initialized())
  }

  /// Moves the live manifest into the master file and links it back.
  ///
  /// On an initialized project this is [`disable`](Self::disable). A master
  /// file left behind while the live manifest is a plain file is only
  /// overwritten with `force`.
  pub fn init(&self, opts: &InitOptions) -> Result<SwapState> {
    if self.is_initialized()? {
      info!(root = %self.root().display(), "already initialized, switching back to master");
      return self.disable();
    }

    let live = self.paths.live();
    let master = self.paths.master();

    if manifest_exists(&master) && !link::is_link(&live)? {
      if !opts.force {
        return Err(SwapError::AlreadyExists { path: master });
      }
      warn!(master = %master.display(), "overwriting existing master file");
    }

    copy_manifest(&live, &master)?;
    link::remove_link(&live)?;
    link::create_link(&master, &live)?;

    info!(root = %self.root().display(), "initialized project");
    Ok(SwapState::InitializedOnMaster)
  }

  /// Writes a new variant copied from master.
  pub fn create(&self, name: &str, opts: &CreateOptions) -> Result<Created> {
    self.require_initialized()?;

    let dest = match &opts.dest {
      Some(dest) => {
        sanitize_name(name)?;
        self.paths.resolve(dest)
      }
      None => self.paths.variant(name)?,
    };
    let dest = self.follow_link(dest)?;
    let master = self.paths.master();
    if same_path(&dest, &master) {
      return Err(SwapError::GuardedTarget { path: dest });
    }

    match fs::symlink_metadata(&dest) {
      Ok(_) if !opts.force => return Err(SwapError::AlreadyExists { path: dest }),
      Ok(_) => warn!(dest = %dest.display(), "overwriting existing variant"),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => return Err(SwapError::io("stat", dest, e)),
    }

    copy_manifest(&master, &dest)?;
    info!(name, dest = %dest.display(), "created variant");

    let names = split_names(&opts.blacklist);
    let blacklist = if names.is_empty() {
      Vec::new()
    } else {
      self.blacklist(&names, &dest)?
    };

    if opts.enable {
      self.enable(&dest)?;
    }

    Ok(Created {
      path: dest,
      blacklist,
      enabled: opts.enable,
    })
  }

  /// Repoints the live manifest at `path`.
  ///
  /// A live manifest that is a plain file is never replaced; this fails with
  /// [`SwapError::NotInitialized`] until the project is initialized.
  ///
  /// Between removing the old link and creating the new one the live
  /// manifest does not exist.
  pub fn enable(&self, path: &Path) -> Result<SwapState> {
    let target = self.paths.resolve(path);
    if !manifest_exists(&target) {
      return Err(SwapError::NotFound { path: target });
    }
    let target = dunce::canonicalize(&target).map_err(|e| SwapError::io("resolve", target.clone(), e))?;

    let live = self.paths.live();
    // a plain live manifest is the only copy of the project's dependencies
    if manifest_exists(&live) && !link::is_link(&live)? {
      return Err(SwapError::NotInitialized {
        root: self.root().to_path_buf(),
      });
    }

    link::remove_link(&live)?;
    link::create_link(&target, &live)?;

    info!(target = %target.display(), "enabled manifest");
    self.status()
  }

  pub fn disable(&self) -> Result<SwapState> {
    self.require_initialized()?;
    self.enable(&self.paths.master())
  }

  /// Removes `names` from the variant at `dest` and records them.
  ///
  /// Returns the variant's full blacklist after merging.
  pub fn blacklist<S: AsRef<str>>(&self, names: &[S], dest: &Path) -> Result<Vec<BlacklistEntry>> {
    let dest = self.guarded_variant(dest)?;
    let variant = read_manifest(&dest)?;
    let stored = stored_blacklist(&variant, &dest)?;

    let (refined, filtered) = filter_packages(&entries_for(&split_names(names)), &variant);
    for entry in refined.iter().filter(|entry| entry.sources.is_empty()) {
      debug!(package = %entry.name, "package not present in any section");
    }
    let merged = merge_entries(&stored, &refined);

    let updated = with_blacklist(&filtered, &merged, &dest)?;
    write_manifest(&dest, &updated)?;

    info!(dest = %dest.display(), count = merged.len(), "updated blacklist");
    Ok(merged)
  }

  /// Drops `names` from the variant's stored blacklist.
  ///
  /// The packages stay out of the dependency sections unless
  /// `opts.restore` is set, which copies each spec back from master into the
  /// sections the entry recorded. Returns the removed entries.
  pub fn unblacklist<S: AsRef<str>>(
    &self,
    names: &[S],
    dest: &Path,
    opts: &UnblacklistOptions,
  ) -> Result<Vec<BlacklistEntry>> {
    let dest = self.guarded_variant(dest)?;
    let variant = read_manifest(&dest)?;
    let stored = stored_blacklist(&variant, &dest)?;

    let (kept, removed) = remove_entries(&stored, &split_names(names));
    let mut updated = with_blacklist(&variant, &kept, &dest)?;

    if opts.restore && !removed.is_empty() {
      let master = read_manifest(&self.paths.master())?;
      for entry in &removed {
        for section in &entry.sources {
          if let Some(spec) = master.spec(*section, &entry.name)
            && !updated.contains(*section, &entry.name)
          {
            debug!(package = %entry.name, section = %section, "restored package from master");
            updated.set_spec(*section, &entry.name, spec.clone());
          }
        }
      }
    }

    write_manifest(&dest, &updated)?;
    info!(dest = %dest.display(), removed = removed.len(), "updated blacklist");
    Ok(removed)
  }

  /// Pulls the dependency changes of the variant at `dest` into master.
  pub fn reconcile_master(&self, dest: &Path) -> Result<Reconciliation> {
    let dest = self.guarded_variant(dest)?;
    let master_path = self.paths.master();

    let source = read_manifest(&dest)?;
    let master = read_manifest(&master_path)?;

    let result = reconcile::reconcile_master(&source, &master).map_err(|e| SwapError::Parse {
      path: dest.clone(),
      message: e.to_string(),
    })?;

    if result.has_changes() {
      write_manifest(&master_path, &result.master)?;
    }
    info!(source = %dest.display(), changes = result.changes.len(), "reconciled master");
    Ok(result)
  }

  /// Variant files in the root, master excluded, sorted by name.
  pub fn variants(&self) -> Result<Vec<Variant>> {
    let active = match self.status()? {
      SwapState::InitializedOnVariant { path, .. } => Some(path),
      _ => None,
    };
    let master = self.paths.master();

    let entries = fs::read_dir(self.root()).map_err(|e| SwapError::io("read directory", self.root(), e))?;
    let mut variants = Vec::new();
    for entry in entries {
      let path = entry.map_err(|e| SwapError::io("read directory", self.root(), e))?.path();
      if path == master || !manifest_exists(&path) {
        continue;
      }
      if let Some(name) = SwapPaths::name_of(&path) {
        let is_active = active.as_deref().is_some_and(|active| same_path(active, &path));
        variants.push(Variant {
          name,
          path,
          active: is_active,
        });
      }
    }

    variants.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(variants)
  }

  fn require_initialized(&self) -> Result<()> {
    if self.is_initialized()? {
      Ok(())
    } else {
      Err(SwapError::NotInitialized {
        root: self.root().to_path_buf(),
      })
    }
  }

  /// Resolves `dest` for an edit, refusing uninitialized projects and master.
  ///
  /// Links are followed so edits land in the target file and the link survives.
  fn guarded_variant(&self, dest: &Path) -> Result<PathBuf> {
    self.require_initialized()?;
    let dest = self.follow_link(self.paths.resolve(dest))?;
    if same_path(&dest, &self.paths.master()) {
      return Err(SwapError::GuardedTarget { path: dest });
    }
    Ok(dest)
  }

  /// The file behind `path` when it is the live manifest or a symlink.
  fn follow_link(&self, path: PathBuf) -> Result<PathBuf> {
    let is_symlink = fs::symlink_metadata(&path).is_ok_and(|meta| meta.file_type().is_symlink());
    if (is_symlink || path == self.paths.live())
      && let Some(target) = link::read_link(&path)?
    {
      debug!(link = %path.display(), target = %target.display(), "following link");
      return Ok(target);
    }
    Ok(path)
  }
}

fn stored_blacklist(manifest: &Manifest, path: &Path) -> Result<Vec<BlacklistEntry>> {
  manifest.blacklist().map_err(|e| SwapError::Parse {
    path: path.to_path_buf(),
    message: format!("invalid blacklist metadata: {e}"),
  })
}

fn with_blacklist(manifest: &Manifest, entries: &[BlacklistEntry], path: &Path) -> Result<Manifest> {
  manifest.with_blacklist(entries).map_err(|e| SwapError::Serialize {
    path: path.to_path_buf(),
    source: e,
  })
}

/// Compares paths after resolving symlinks, falling back to the raw paths
/// when either side does not exist.
fn same_path(a: &Path, b: &Path) -> bool {
  match (dunce::canonicalize(a), dunce::canonicalize(b)) {
    (Ok(a), Ok(b)) => a == b,
    _ => a == b,
  }
}
