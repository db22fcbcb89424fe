use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::APP_NAME;

/// Key under the metadata namespace holding the blacklist.
const BLACKLIST_KEY: &str = "blacklist";

/// A dependency section of the manifest.
///
/// Declaration order is the canonical iteration order; `Ord` follows it, so
/// ordered collections keyed by `DepSection` iterate canonically too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DepSection {
  Dependencies,
  DevDependencies,
  PeerDependencies,
  OptionalDependencies,
  BundledDependencies,
}

impl DepSection {
  /// Every section, in canonical order.
  pub const ALL: [DepSection; 5] = [
    DepSection::Dependencies,
    DepSection::DevDependencies,
    DepSection::PeerDependencies,
    DepSection::OptionalDependencies,
    DepSection::BundledDependencies,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      DepSection::Dependencies => "dependencies",
      DepSection::DevDependencies => "devDependencies",
      DepSection::PeerDependencies => "peerDependencies",
      DepSection::OptionalDependencies => "optionalDependencies",
      DepSection::BundledDependencies => "bundledDependencies",
    }
  }
}

impl fmt::Display for DepSection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for DepSection {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    DepSection::ALL
      .into_iter()
      .find(|section| section.as_str() == s)
      .ok_or_else(|| format!("unknown dependency section: {s}"))
  }
}

/// A package excluded from a variant.
///
/// `sources` lists the sections the package was actually removed from. An
/// entry built from user input starts with no sources, which the filter
/// reads as "look in every section".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
  pub name: String,
  #[serde(default)]
  pub sources: BTreeSet<DepSection>,
}

impl BlacklistEntry {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      sources: BTreeSet::new(),
    }
  }

  pub fn with_sources(name: impl Into<String>, sources: impl IntoIterator<Item = DepSection>) -> Self {
    Self {
      name: name.into(),
      sources: sources.into_iter().collect(),
    }
  }
}

/// A parsed manifest.
///
/// Wraps the top-level JSON object so keys pkgswap does not understand
/// survive a read/write cycle untouched. Transformations clone and return a
/// new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_map(map: Map<String, Value>) -> Self {
    Self(map)
  }

  pub fn as_map(&self) -> &Map<String, Value> {
    &self.0
  }

  pub fn into_value(self) -> Value {
    Value::Object(self.0)
  }

  /// The packages of a section, or `None` when absent or not an object.
  pub fn section(&self, section: DepSection) -> Option<&Map<String, Value>> {
    self.0.get(section.as_str()).and_then(Value::as_object)
  }

  /// The version specifier of `name` in `section`.
  pub fn spec(&self, section: DepSection, name: &str) -> Option<&Value> {
    self.section(section).and_then(|deps| deps.get(name))
  }

  pub fn contains(&self, section: DepSection, name: &str) -> bool {
    self.spec(section, name).is_some()
  }

  /// Inserts or replaces a specifier, creating the section if needed.
  ///
  /// A section holding something other than an object is replaced.
  pub fn set_spec(&mut self, section: DepSection, name: &str, spec: Value) {
    let entry = self
      .0
      .entry(section.as_str())
      .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
      *entry = Value::Object(Map::new());
    }
    if let Value::Object(deps) = entry {
      deps.insert(name.to_string(), spec);
    }
  }

  /// Removes a specifier, returning it if it was present.
  pub fn remove_spec(&mut self, section: DepSection, name: &str) -> Option<Value> {
    self
      .0
      .get_mut(section.as_str())
      .and_then(Value::as_object_mut)
      .and_then(|deps| deps.shift_remove(name))
  }

  /// The blacklist stored under the `pkgswap` metadata key.
  ///
  /// Returns an empty list when no metadata is present.
  pub fn blacklist(&self) -> Result<Vec<BlacklistEntry>, serde_json::Error> {
    match self.0.get(APP_NAME).and_then(|meta| meta.get(BLACKLIST_KEY)) {
      Some(value) => Vec::<BlacklistEntry>::deserialize(value),
      None => Ok(Vec::new()),
    }
  }

  /// Returns a copy with the stored blacklist replaced by `entries`.
  ///
  /// An empty blacklist drops the key, and the namespace object with it when
  /// nothing else lives there.
  pub fn with_blacklist(&self, entries: &[BlacklistEntry]) -> Result<Manifest, serde_json::Error> {
    let mut map = self.0.clone();

    if entries.is_empty() {
      let now_empty = match map.get_mut(APP_NAME).and_then(Value::as_object_mut) {
        Some(meta) => {
          meta.shift_remove(BLACKLIST_KEY);
          meta.is_empty()
        }
        None => false,
      };
      if now_empty {
        map.shift_remove(APP_NAME);
      }
      return Ok(Manifest(map));
    }

    let list = serde_json::to_value(entries)?;
    let meta = map
      .entry(APP_NAME)
      .or_insert_with(|| Value::Object(Map::new()));
    if !meta.is_object() {
      *meta = Value::Object(Map::new());
    }
    if let Value::Object(meta) = meta {
      meta.insert(BLACKLIST_KEY.to_string(), list);
    }
    Ok(Manifest(map))
  }
}

impl From<Map<String, Value>> for Manifest {
  fn from(map: Map<String, Value>) -> Self {
    Manifest(map)
  }
}
