//! Keeps a single release pull request open for the next version of a
//! package, computed from the conventional commits merged since the last
//! release tag.
pub mod analyzer;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod forge;
pub mod result;
pub mod updater;

pub use command::release_pr::{ReleasePrOutcome, execute};
pub use result::Result;

#[cfg(test)]
pub mod test_helpers;
