//! File updates applied to the release branch for a new version.
pub mod changelog;
pub mod framework;
pub mod manager;
pub mod node;
pub mod rust;
pub mod traits;
