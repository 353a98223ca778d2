//! Typed errors for releasekeeper.

use thiserror::Error;

/// Failures that abort a release-pr run.
///
/// The two "nothing to do" outcomes (pending release, no user facing
/// change) are not errors and are reported through
/// [`crate::command::release_pr::ReleasePrOutcome`] instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReleaseError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported release type: {0}")]
    InvalidReleaseType(String),

    #[error("Invalid release-as version: {0}")]
    InvalidReleaseAs(String),

    #[error("Invalid git remote URL: {0}")]
    InvalidRemoteUrl(String),

    #[error("Missing forge token: pass --github-token or set GITHUB_TOKEN")]
    MissingToken,

    // Computation errors
    #[error("Unable to compute next version from previous version: {version}")]
    VersionComputation { version: String },
}

impl ReleaseError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a version computation error for the offending version string
    pub fn version_computation(version: impl Into<String>) -> Self {
        Self::VersionComputation {
            version: version.into(),
        }
    }
}
