//! Commit analysis, version detection, and changelog generation.
//!
//! Classifies conventional commits, resolves the semver bump they warrant,
//! coerces the next version and renders the changelog section for it.

use chrono::NaiveDate;
use log::*;

use crate::{
    analyzer::{
        bump::{BumpDecision, BumpPolicy},
        changelog::{ChangelogEntry, ChangelogSynthesizer},
        commit::ClassifiedCommit,
        release::{ReleaseCandidate, Tag},
    },
    forge::request::ForgeCommit,
    result::Result,
};

pub mod bump;
pub mod changelog;
pub mod commit;
pub mod config;
pub mod group;
mod helpers;
pub mod release;
pub mod version;

/// Everything derived from the commit history for one run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub commits: Vec<ClassifiedCommit>,
    pub bump: BumpDecision,
    pub candidate: ReleaseCandidate,
    pub changelog: ChangelogEntry,
}

/// Runs classification, bump resolution, version coercion and changelog
/// synthesis over a commit history.
pub struct Analyzer {
    config: config::AnalyzerConfig,
    synthesizer: ChangelogSynthesizer,
}

impl Analyzer {
    pub fn new(config: config::AnalyzerConfig) -> Self {
        let synthesizer = ChangelogSynthesizer::new(&config.repository_url)
            .with_template(&config.body);

        Self {
            config,
            synthesizer,
        }
    }

    /// Analyze `commits` (newest first) made since `current_tag`.
    pub fn analyze(
        &self,
        commits: &[ForgeCommit],
        current_tag: Option<&Tag>,
        date: NaiveDate,
    ) -> Result<Analysis> {
        let classified = commit::classify_all(commits);

        let pre_major = current_tag
            .and_then(|t| version::parse_version(&t.version))
            .map(|v| v.major == 0)
            .unwrap_or(false);

        let policy = BumpPolicy {
            pre_major,
            bump_minor_pre_major: self.config.bump_minor_pre_major,
        };

        let bump = bump::resolve_bump(&classified, &policy);

        info!(
            "{} conventional commits out of {}: bump = {bump}",
            classified.len(),
            commits.len()
        );

        let candidate = version::coerce_release_candidate(
            current_tag,
            bump,
            self.config.release_as.as_ref(),
            &self.config.seed_version,
        )?;

        let changelog =
            self.synthesizer.synthesize(&candidate, &classified, date)?;

        Ok(Analysis {
            commits: classified,
            bump,
            candidate,
            changelog,
        })
    }
}
