//! Blacklist filtering.
//!
//! A variant can omit packages that master declares. Filtering removes them
//! from the dependency sections and records, per package, exactly which
//! sections they were removed from. Reconciliation relies on that record to
//! tell an intentional omission apart from a deletion.

use std::collections::BTreeSet;

use tracing::debug;

use crate::manifest::{BlacklistEntry, DepSection, Manifest};

/// Removes blacklisted packages from `manifest`.
///
/// Returns the refined entries alongside the filtered copy; the input is not
/// modified. For each entry, the sections searched are its `sources`, or
/// every section when it has none. Each refined entry's `sources` holds the
/// sections a package was actually deleted from, so it is empty when the
/// package was not found anywhere. Such entries are kept.
pub fn filter_packages(entries: &[BlacklistEntry], manifest: &Manifest) -> (Vec<BlacklistEntry>, Manifest) {
  let mut filtered = manifest.clone();
  let mut refined = Vec::with_capacity(entries.len());

  for entry in entries {
    let candidates: Vec<DepSection> = if entry.sources.is_empty() {
      DepSection::ALL.to_vec()
    } else {
      entry.sources.iter().copied().collect()
    };

    let mut removed_from = BTreeSet::new();
    for section in candidates {
      if filtered.remove_spec(section, &entry.name).is_some() {
        debug!(package = %entry.name, section = %section, "filtered package");
        removed_from.insert(section);
      }
    }

    refined.push(BlacklistEntry {
      name: entry.name.clone(),
      sources: removed_from,
    });
  }

  (refined, filtered)
}

/// Unions `incoming` into `stored` by name.
///
/// Existing entries keep their position and gain any new sources; new names
/// are appended in the order given.
pub fn merge_entries(stored: &[BlacklistEntry], incoming: &[BlacklistEntry]) -> Vec<BlacklistEntry> {
  let mut merged: Vec<BlacklistEntry> = stored.to_vec();
  for entry in incoming {
    match merged.iter_mut().find(|existing| existing.name == entry.name) {
      Some(existing) => existing.sources.extend(entry.sources.iter().copied()),
      None => merged.push(entry.clone()),
    }
  }
  merged
}

/// Splits `stored` into entries to keep and entries whose name is in `names`.
pub fn remove_entries(stored: &[BlacklistEntry], names: &[String]) -> (Vec<BlacklistEntry>, Vec<BlacklistEntry>) {
  stored
    .iter()
    .cloned()
    .partition(|entry| !names.iter().any(|name| *name == entry.name))
}

/// Fresh entries (no sources) for a list of package names, deduplicated.
pub fn entries_for(names: &[String]) -> Vec<BlacklistEntry> {
  let mut entries: Vec<BlacklistEntry> = Vec::new();
  for name in names {
    if !entries.iter().any(|entry| entry.name == *name) {
      entries.push(BlacklistEntry::new(name.as_str()));
    }
  }
  entries
}

/// Normalises package names given either repeated or comma-separated.
///
/// Blank items are dropped and duplicates keep their first position.
pub fn split_names<S: AsRef<str>>(values: &[S]) -> Vec<String> {
  let mut names: Vec<String> = Vec::new();
  for item in values.iter().flat_map(|value| value.as_ref().split(',')) {
    let item = item.trim();
    if !item.is_empty() && !names.iter().any(|name| name == item) {
      names.push(item.to_string());
    }
  }
  names
}
