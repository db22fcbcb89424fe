//! pkgswap-lib: keep several variants of a `package.json` and swap between them.
//!
//! A project is initialized by moving its manifest into a master file and
//! replacing `package.json` with a symlink. Variants are copies of master
//! that may blacklist packages; enabling one repoints the symlink.
//!
//! - [`manifest`]: manifest values, the dependency view, file I/O
//! - [`blacklist`]: filtering packages out of a variant
//! - [`reconcile`]: merging variant changes back into master
//! - [`swap`]: the lifecycle operations (`init`, `create`, `enable`, ...)

pub mod blacklist;
pub mod consts;
pub mod error;
pub mod manifest;
pub mod platform;
pub mod reconcile;
pub mod swap;
pub mod util;

pub use error::{ErrorKind, Result, Severity, SwapError};
pub use swap::PkgSwap;
