//! Release pull request creation command implementation.
use chrono::{NaiveDate, Utc};
use color_eyre::eyre::OptionExt;
use log::*;
use semver::Version;

use crate::{
    analyzer::{Analyzer, commit::short_sha},
    command::common::{CheckpointType, checkpoint},
    config::ReleasePrConfig,
    forge::{request::OpenPrRequest, traits::Forge},
    result::Result,
    updater::{
        framework::{Framework, UpdateContext},
        manager::build_update_set,
    },
};

/// Where a release-pr run ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleasePrOutcome {
    /// A release PR was merged as `merge_sha` but not released yet; nothing
    /// was changed.
    PendingRelease { pr_number: u64, merge_sha: String },
    /// No user facing commits since the last release; nothing was changed.
    NoUserFacingChange,
    /// The release PR for `version` is open and labeled; `closed` lists the
    /// stale release PRs that were retired.
    Opened {
        pr_number: u64,
        version: Version,
        closed: Vec<u64>,
    },
}

impl ReleasePrOutcome {
    /// The open or pending release PR, if any.
    pub fn pr_number(&self) -> Option<u64> {
        match self {
            ReleasePrOutcome::PendingRelease { pr_number, .. } => {
                Some(*pr_number)
            }
            ReleasePrOutcome::Opened { pr_number, .. } => Some(*pr_number),
            ReleasePrOutcome::NoUserFacingChange => None,
        }
    }
}

/// Keeps a single release PR open for the next version.
///
/// Every step awaits the forge in sequence: the merged-PR check happens
/// before a PR is opened, and the PR is opened before stale ones are closed.
pub struct ReleasePr<'f> {
    config: ReleasePrConfig,
    forge: &'f dyn Forge,
    framework: Box<dyn Framework>,
}

impl<'f> ReleasePr<'f> {
    pub fn new(config: ReleasePrConfig, forge: &'f dyn Forge) -> Self {
        let framework = config.release_type.framework();
        Self {
            config,
            forge,
            framework,
        }
    }

    /// Run the workflow dated today (UTC).
    pub async fn run(&self) -> Result<ReleasePrOutcome> {
        self.run_on(Utc::now().date_naive()).await
    }

    /// Run the workflow, dating the changelog entry `date`.
    pub async fn run_on(&self, date: NaiveDate) -> Result<ReleasePrOutcome> {
        let labels = self.config.labels.clone();

        if let Some(pr) = self.forge.find_merged_release_pr(labels).await? {
            checkpoint(
                format!(
                    "pull #{} ({}) has not yet been released, skipping release PR",
                    pr.number,
                    short_sha(&pr.sha)
                ),
                CheckpointType::Failure,
            );
            return Ok(ReleasePrOutcome::PendingRelease {
                pr_number: pr.number,
                merge_sha: pr.sha,
            });
        }

        let latest_tag = self.forge.latest_tag().await?;
        info!("latest release tag: {:?}", latest_tag);

        let commits = self
            .forge
            .commits_since_sha(latest_tag.as_ref().map(|t| t.sha.clone()))
            .await?;

        let analysis = Analyzer::new(self.config.analyzer_config()).analyze(
            &commits,
            latest_tag.as_ref(),
            date,
        )?;

        if analysis.changelog.is_empty() {
            let since = latest_tag
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "the beginning of history".into());
            checkpoint(
                format!("no user facing commits found since {since}, skipping"),
                CheckpointType::Failure,
            );
            return Ok(ReleasePrOutcome::NoUserFacingChange);
        }

        let version = analysis.candidate.version.clone();

        checkpoint(
            format!(
                "{} release for {}: {} ({} bump)",
                self.framework.name(),
                self.config.package_name,
                version,
                analysis.bump
            ),
            CheckpointType::Success,
        );

        let updates = build_update_set(
            self.framework.as_ref(),
            &UpdateContext {
                package_name: self.config.package_name.clone(),
                path: self.config.path.clone(),
                version: version.clone(),
                notes: analysis.changelog.notes.clone(),
            },
        );

        // commits arrive newest first: the release branch is cut from HEAD
        let sha = commits
            .first()
            .map(|c| c.sha.clone())
            .ok_or_eyre("no commit to cut the release branch from")?;

        let pr_number = self
            .forge
            .open_pr(OpenPrRequest {
                branch: self.config.branch_name(&version),
                version: version.to_string(),
                sha,
                updates,
                title: release_title(&version),
                body: release_body(&analysis.changelog.notes),
                labels: self.config.labels.clone(),
            })
            .await?;

        checkpoint(
            format!("opened release PR #{pr_number} for {version}"),
            CheckpointType::Success,
        );

        self.forge
            .add_labels(pr_number, self.config.labels.clone())
            .await?;

        let closed = close_stale_release_prs(
            self.forge,
            pr_number,
            self.config.labels.clone(),
        )
        .await?;

        Ok(ReleasePrOutcome::Opened {
            pr_number,
            version,
            closed,
        })
    }
}

/// Close every open release PR other than `keep`, returning the numbers
/// that were closed.
pub async fn close_stale_release_prs(
    forge: &dyn Forge,
    keep: u64,
    labels: Vec<String>,
) -> Result<Vec<u64>> {
    let open = forge.find_open_release_prs(labels).await?;
    let mut closed = vec![];

    for pr in open.into_iter().filter(|pr| pr.number != keep) {
        info!("closing stale release PR #{} ({})", pr.number, pr.title);
        forge.close_pr(pr.number).await?;
        closed.push(pr.number);
    }

    if !closed.is_empty() {
        checkpoint(
            format!("closed {} stale release PR(s): {:?}", closed.len(), closed),
            CheckpointType::Success,
        );
    }

    Ok(closed)
}

/// Title of the release PR for `version`.
pub fn release_title(version: &Version) -> String {
    format!("chore: release {version}")
}

/// Body of the release PR wrapping the rendered changelog.
pub fn release_body(notes: &str) -> String {
    format!(
        ":robot: I have created a release \\*beep\\* \\*boop\\*\n---\n{notes}\n---\n\nThis PR was generated by releasekeeper. Merge it to cut the release.\n"
    )
}

/// Run the release-pr workflow against `forge`.
pub async fn execute(
    forge: &dyn Forge,
    config: ReleasePrConfig,
) -> Result<ReleasePrOutcome> {
    info!(
        "processing package: {}, release type: {}, path: {}",
        config.package_name, config.release_type, config.path
    );

    ReleasePr::new(config, forge).run().await
}
