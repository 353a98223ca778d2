//! Traits related to remote git forges
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    analyzer::release::Tag,
    forge::request::{ForgeCommit, OpenPrRequest, PullRequest},
    result::Result,
};

/// Operations the release-pr workflow needs from a source-control host.
///
/// Implementations perform no retries; failures propagate to the caller.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    /// Most recent merged PR carrying all `labels` that has not been tagged
    /// as released yet.
    async fn find_merged_release_pr(
        &self,
        labels: Vec<String>,
    ) -> Result<Option<PullRequest>>;

    /// Latest release tag, highest version first.
    async fn latest_tag(&self) -> Result<Option<Tag>>;

    /// Commits after `sha` (exclusive), newest first. All commits when
    /// `sha` is None.
    async fn commits_since_sha(
        &self,
        sha: Option<String>,
    ) -> Result<Vec<ForgeCommit>>;

    /// Apply the request's updates on a release branch and open (or
    /// refresh) its PR, returning the PR number.
    async fn open_pr(&self, req: OpenPrRequest) -> Result<u64>;

    async fn add_labels(&self, pr_number: u64, labels: Vec<String>)
    -> Result<()>;

    /// Open PRs carrying all `labels`.
    async fn find_open_release_prs(
        &self,
        labels: Vec<String>,
    ) -> Result<Vec<PullRequest>>;

    async fn close_pr(&self, pr_number: u64) -> Result<()>;
}
