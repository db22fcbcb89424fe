//! Manifest values and their on-disk store.
//!
//! A [`Manifest`] is the parsed `package.json` object. The dependency view
//! derives package names per [`DepSection`], and the store handles file I/O.

mod store;
mod types;
mod view;

pub use store::{copy_manifest, manifest_exists, read_manifest, write_manifest};
pub use types::{BlacklistEntry, DepSection, Manifest};
pub use view::{DependencyView, build_dependency_view};
