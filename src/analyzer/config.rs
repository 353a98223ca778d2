//! Configuration for commit analysis and changelog generation.
use semver::Version;

use crate::analyzer::{changelog::DEFAULT_BODY, version::DEFAULT_SEED_VERSION};

/// Configuration for commit analysis and changelog generation.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Browser URL of the repository, used for commit and compare links.
    pub repository_url: String,
    /// Tera template string for the changelog section.
    pub body: String,
    /// Treat feature commits as patch bumps while the version is below 1.0.0
    pub bump_minor_pre_major: bool,
    /// Explicit version that overrides the computed bump.
    pub release_as: Option<Version>,
    /// Version for the first release when no tag exists.
    pub seed_version: Version,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            repository_url: "".into(),
            body: DEFAULT_BODY.into(),
            bump_minor_pre_major: false,
            release_as: None,
            seed_version: DEFAULT_SEED_VERSION,
        }
    }
}
