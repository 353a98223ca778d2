//! Interface to the source-control host that stores PRs, labels and tags.

/// Connection settings and release label constants.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Request and response types exchanged with a forge.
pub mod request;

/// The [`traits::Forge`] abstraction used by the release-pr workflow.
pub mod traits;
