use crate::updater::traits::Updater;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single commit returned from the forge: the full message paired with
/// the sha it came from.
pub struct ForgeCommit {
    pub sha: String,
    pub message: String,
}

impl ForgeCommit {
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Release pull request information.
pub struct PullRequest {
    pub number: u64,
    /// Merge commit for merged PRs; empty when the listing does not carry it
    pub sha: String,
    pub title: String,
}

#[derive(Debug)]
/// Request to create (or refresh) the release pull request.
pub struct OpenPrRequest {
    /// Release branch name, e.g. `release-v1.3.0`
    pub branch: String,
    /// Candidate version being released
    pub version: String,
    /// Sha the release branch is cut from
    pub sha: String,
    /// File updaters to apply on top of `sha`, in order
    pub updates: Vec<Box<dyn Updater>>,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

impl OpenPrRequest {
    /// Paths touched by this request, in application order.
    pub fn update_paths(&self) -> Vec<String> {
        self.updates.iter().map(|u| u.path().to_string()).collect()
    }
}
