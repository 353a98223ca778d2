//! Command execution for releasekeeper.
//!
//! - **common**: checkpoint logging shared by commands
//! - **release_pr**: compute the next release and keep one release PR open
//!   for it, closing superseded ones

/// Checkpoint logging shared by commands.
pub mod common;

/// Release pull request creation and stale PR retirement.
pub mod release_pr;
