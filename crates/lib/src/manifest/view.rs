use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use super::types::{DepSection, Manifest};

/// Package names declared per dependency section.
///
/// Always holds exactly one entry for every [`DepSection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyView(BTreeMap<DepSection, BTreeSet<String>>);

impl DependencyView {
  /// Builds the view of `manifest`; absent sections map to empty sets.
  pub fn build(manifest: &Manifest) -> Self {
    let mut view = BTreeMap::new();
    for section in DepSection::ALL {
      let names = match manifest.section(section) {
        Some(deps) => deps.keys().cloned().collect(),
        None => {
          if manifest.as_map().contains_key(section.as_str()) {
            warn!(section = %section, "dependency section is not an object, treating as empty");
          }
          BTreeSet::new()
        }
      };
      view.insert(section, names);
    }
    Self(view)
  }

  pub fn names(&self, section: DepSection) -> &BTreeSet<String> {
    // every section is populated by `build`
    &self.0[&section]
  }

  pub fn insert(&mut self, section: DepSection, name: impl Into<String>) -> bool {
    self.0.entry(section).or_default().insert(name.into())
  }

  /// Iterates sections in canonical order.
  pub fn iter(&self) -> impl Iterator<Item = (DepSection, &BTreeSet<String>)> {
    self.0.iter().map(|(section, names)| (*section, names))
  }
}

/// Shorthand for [`DependencyView::build`].
pub fn build_dependency_view(manifest: &Manifest) -> DependencyView {
  DependencyView::build(manifest)
}
