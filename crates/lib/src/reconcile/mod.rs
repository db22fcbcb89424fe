//! Merging a variant's dependency changes back into master.
//!
//! Reconciliation is additive: packages the variant added or re-versioned are
//! copied into master, and nothing is ever removed from master. Blacklisted
//! packages are put back into the variant's view using the sections recorded
//! when they were filtered, so an omission never reads as a deletion.

use serde_json::Value;
use tracing::debug;

use crate::manifest::{DepSection, Manifest, build_dependency_view};

/// How a single master entry changed.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeKind {
  Added,
  Updated { from: Value },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Change {
  pub section: DepSection,
  pub name: String,
  pub spec: Value,
  pub kind: ChangeKind,
}

/// Result of [`reconcile_master`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
  pub master: Manifest,
  pub changes: Vec<Change>,
}

impl Reconciliation {
  pub fn has_changes(&self) -> bool {
    !self.changes.is_empty()
  }
}

/// Computes the master that results from pulling `source`'s changes forward.
///
/// Neither input is modified. Fails only when `source` carries malformed
/// blacklist metadata.
pub fn reconcile_master(source: &Manifest, master: &Manifest) -> Result<Reconciliation, serde_json::Error> {
  let mut view = build_dependency_view(source);
  for entry in source.blacklist()? {
    for section in &entry.sources {
      view.insert(*section, entry.name.as_str());
    }
  }

  let mut updated = master.clone();
  let mut changes = Vec::new();

  for (section, names) in view.iter() {
    for name in names {
      // blacklisted names have no spec left to copy
      let Some(spec) = source.spec(section, name) else {
        debug!(package = %name, section = %section, "no spec in source, skipping");
        continue;
      };

      let kind = match master.spec(section, name) {
        None => ChangeKind::Added,
        Some(current) if current != spec => ChangeKind::Updated { from: current.clone() },
        Some(_) => continue,
      };

      debug!(package = %name, section = %section, spec = %spec, "reconciling into master");
      updated.set_spec(section, name, spec.clone());
      changes.push(Change {
        section,
        name: name.clone(),
        spec: spec.clone(),
        kind,
      });
    }
  }

  Ok(Reconciliation {
    master: updated,
    changes,
  })
}
