//! Filesystem glue: locating the project root and managing the live link.

pub mod link;
mod root;

pub use root::{find_root, start_dir};
