//! Data types for tags and release candidates.
use semver::Version;
use std::fmt::Display;

/// Git tag that marks a previous release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Git commit SHA of the tag.
    pub sha: String,
    /// Tag name, e.g. `v1.2.3`.
    pub name: String,
    /// Version text as recorded on the tag, prefix stripped or not. Parsed
    /// lazily so a malformed tag surfaces as a computation error.
    pub version: String,
}

impl Tag {
    pub fn new(
        sha: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            sha: sha.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// The version proposed for the next release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCandidate {
    pub version: Version,
    pub previous_tag: Option<Tag>,
}

impl ReleaseCandidate {
    /// Tag name the release will be cut as.
    pub fn tag_name(&self) -> String {
        format!("v{}", self.version)
    }
}
