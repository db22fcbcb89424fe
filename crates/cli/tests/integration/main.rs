//! CLI integration tests, run against throwaway projects.

// live manifest assertions read symlinks directly
#![cfg(unix)]

mod blacklist_tests;
mod common;
mod lifecycle_tests;
mod reconcile_tests;
