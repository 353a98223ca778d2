//! Settings for a release-pr run.
use derive_builder::Builder;
use semver::Version;

use crate::{
    analyzer::{
        changelog::DEFAULT_BODY, config::AnalyzerConfig, version::parse_version,
    },
    error::ReleaseError,
    forge::config::{DEFAULT_PR_BRANCH_PREFIX, default_labels},
    result::Result,
};

pub mod release_type;

pub use release_type::ReleaseType;

/// Everything the release-pr workflow needs to know about the package it is
/// releasing.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct ReleasePrConfig {
    /// Package name as published
    pub package_name: String,
    /// Browser URL of the repository, used for changelog links
    pub repository_url: String,
    /// Package directory relative to the repository root
    #[builder(default = "\".\".into()")]
    pub path: String,
    #[builder(default)]
    pub release_type: ReleaseType,
    /// Labels that identify release PRs
    #[builder(default = "default_labels()")]
    pub labels: Vec<String>,
    /// Treat feature commits as patch bumps while below 1.0.0
    #[builder(default)]
    pub bump_minor_pre_major: bool,
    /// Explicit version for this release
    #[builder(default)]
    pub release_as: Option<Version>,
    /// Custom tera template for the changelog section
    #[builder(default, setter(into, strip_option))]
    pub changelog_template: Option<String>,
    #[builder(default = "DEFAULT_PR_BRANCH_PREFIX.into()")]
    pub branch_prefix: String,
}

impl ReleasePrConfigBuilder {
    pub fn build(&self) -> Result<ReleasePrConfig> {
        let config = self._build().map_err(|e| {
            ReleaseError::invalid_config(format!(
                "Failed to build release-pr config: {e}"
            ))
        })?;

        if config.labels.is_empty() {
            return Err(ReleaseError::invalid_config(
                "at least one release label is required",
            )
            .into());
        }

        Ok(config)
    }
}

impl ReleasePrConfig {
    pub fn builder() -> ReleasePrConfigBuilder {
        ReleasePrConfigBuilder::default()
    }

    /// Release branch name for `version`.
    pub fn branch_name(&self, version: &Version) -> String {
        format!("{}{version}", self.branch_prefix)
    }

    /// Analyzer settings derived from this config and the release type's
    /// seed version.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            repository_url: self.repository_url.clone(),
            body: self
                .changelog_template
                .clone()
                .unwrap_or_else(|| DEFAULT_BODY.into()),
            bump_minor_pre_major: self.bump_minor_pre_major,
            release_as: self.release_as.clone(),
            seed_version: self.release_type.framework().seed_version(),
        }
    }
}

/// Parse a `--release-as` value, allowing a leading `v`.
pub fn parse_release_as(raw: &str) -> Result<Version> {
    parse_version(raw)
        .ok_or_else(|| ReleaseError::InvalidReleaseAs(raw.to_string()).into())
}
