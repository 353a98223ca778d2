//! Common test helper functions shared across test modules.
//!
//! Provides fixtures for configs, commits and pull requests, plus an
//! in-memory [`FakeForge`] for exercising the release-pr workflow across
//! several runs.
use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::Mutex;

use crate::{
    analyzer::{
        commit::{ClassifiedCommit, classify},
        release::Tag,
    },
    config::{ReleasePrConfig, ReleaseType},
    forge::{
        config::{RemoteConfig, default_labels},
        request::{ForgeCommit, OpenPrRequest, PullRequest},
        traits::Forge,
    },
    result::Result,
};

/// Creates a test RemoteConfig pointing at github.com/acme/widgets.
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        host: "github.com".to_string(),
        scheme: "https".to_string(),
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        token: SecretString::from("test-token".to_string()),
    }
}

/// Creates a ReleasePrConfig for the `widgets` package with default labels.
pub fn create_test_config(release_type: ReleaseType) -> ReleasePrConfig {
    ReleasePrConfig::builder()
        .package_name("widgets")
        .repository_url("https://github.com/acme/widgets")
        .release_type(release_type)
        .build()
        .unwrap()
}

/// Classify `message`, panicking when it is not a conventional commit.
pub fn classified(sha: &str, message: &str) -> ClassifiedCommit {
    classify(&ForgeCommit::new(sha, message))
        .conventional()
        .unwrap_or_else(|| panic!("not a conventional commit: {message}"))
}

/// A release PR whose merge commit is `sha-<number>`.
pub fn pull_request(number: u64) -> PullRequest {
    PullRequest {
        number,
        sha: format!("sha-{number}"),
        title: format!("chore: release pr {number}"),
    }
}

#[derive(Debug, Clone)]
struct FakePr {
    number: u64,
    branch: String,
    sha: String,
    title: String,
    labels: Vec<String>,
    open: bool,
    merged: bool,
}

impl FakePr {
    fn has_labels(&self, labels: &[String]) -> bool {
        labels.iter().all(|l| self.labels.contains(l))
    }

    fn to_pull_request(&self) -> PullRequest {
        PullRequest {
            number: self.number,
            sha: self.sha.clone(),
            title: self.title.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    tag: Option<Tag>,
    /// Newest first
    commits: Vec<ForgeCommit>,
    prs: Vec<FakePr>,
    next_number: u64,
}

/// Forge that keeps branches and PRs in memory, refreshing an open PR in
/// place when the same branch is opened twice.
#[derive(Debug, Default)]
pub struct FakeForge {
    state: Mutex<FakeState>,
}

impl FakeForge {
    /// `commits` are given newest first.
    pub fn new(tag: Option<Tag>, commits: Vec<ForgeCommit>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                tag,
                commits,
                prs: vec![],
                next_number: 1,
            }),
        }
    }

    /// Land a new commit on the default branch.
    pub fn push_commit(&self, commit: ForgeCommit) {
        self.state.lock().unwrap().commits.insert(0, commit);
    }

    /// Merge PR `number` without releasing it.
    pub fn merge(&self, number: u64) {
        let mut state = self.state.lock().unwrap();
        if let Some(pr) = state.prs.iter_mut().find(|pr| pr.number == number) {
            pr.open = false;
            pr.merged = true;
        }
    }

    /// Numbers of open PRs that carry the default release labels.
    pub fn open_release_pr_numbers(&self) -> Vec<u64> {
        let labels = default_labels();
        self.state
            .lock()
            .unwrap()
            .prs
            .iter()
            .filter(|pr| pr.open && pr.has_labels(&labels))
            .map(|pr| pr.number)
            .collect()
    }
}

#[async_trait]
impl Forge for FakeForge {
    async fn find_merged_release_pr(
        &self,
        labels: Vec<String>,
    ) -> Result<Option<PullRequest>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .prs
            .iter()
            .rev()
            .find(|pr| pr.merged && pr.has_labels(&labels))
            .map(FakePr::to_pull_request))
    }

    async fn latest_tag(&self) -> Result<Option<Tag>> {
        Ok(self.state.lock().unwrap().tag.clone())
    }

    async fn commits_since_sha(
        &self,
        sha: Option<String>,
    ) -> Result<Vec<ForgeCommit>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .commits
            .iter()
            .take_while(|c| Some(&c.sha) != sha.as_ref())
            .cloned()
            .collect())
    }

    async fn open_pr(&self, req: OpenPrRequest) -> Result<u64> {
        let mut state = self.state.lock().unwrap();

        if let Some(pr) = state
            .prs
            .iter_mut()
            .find(|pr| pr.open && pr.branch == req.branch)
        {
            pr.sha = req.sha;
            pr.title = req.title;
            return Ok(pr.number);
        }

        let number = state.next_number;
        state.next_number += 1;
        state.prs.push(FakePr {
            number,
            branch: req.branch,
            sha: req.sha,
            title: req.title,
            labels: vec![],
            open: true,
            merged: false,
        });

        Ok(number)
    }

    async fn add_labels(
        &self,
        pr_number: u64,
        labels: Vec<String>,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(pr) = state.prs.iter_mut().find(|pr| pr.number == pr_number)
        {
            for label in labels {
                if !pr.labels.contains(&label) {
                    pr.labels.push(label);
                }
            }
        }
        Ok(())
    }

    async fn find_open_release_prs(
        &self,
        labels: Vec<String>,
    ) -> Result<Vec<PullRequest>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .prs
            .iter()
            .filter(|pr| pr.open && pr.has_labels(&labels))
            .map(FakePr::to_pull_request)
            .collect())
    }

    async fn close_pr(&self, pr_number: u64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(pr) = state.prs.iter_mut().find(|pr| pr.number == pr_number)
        {
            pr.open = false;
        }
        Ok(())
    }
}
