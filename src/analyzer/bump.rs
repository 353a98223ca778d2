//! Reduces classified commits into a single semver bump.
use log::*;
use std::fmt::Display;

use crate::analyzer::commit::{ClassifiedCommit, CommitType};

/// Size of the version change warranted by a set of commits. Ordered so the
/// largest bump wins with `max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum BumpDecision {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl Display for BumpDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BumpDecision::None => f.write_str("none"),
            BumpDecision::Patch => f.write_str("patch"),
            BumpDecision::Minor => f.write_str("minor"),
            BumpDecision::Major => f.write_str("major"),
        }
    }
}

/// Inputs that shape the bump beyond the commits themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BumpPolicy {
    /// The current version is below 1.0.0
    pub pre_major: bool,
    /// Downgrade feature bumps to patch while pre_major
    pub bump_minor_pre_major: bool,
}

impl BumpPolicy {
    fn suppress_minor(&self) -> bool {
        self.pre_major && self.bump_minor_pre_major
    }
}

fn commit_bump(commit: &ClassifiedCommit) -> BumpDecision {
    if commit.breaking {
        return BumpDecision::Major;
    }

    match commit.commit_type {
        CommitType::Feat => BumpDecision::Minor,
        t if t.is_user_facing() => BumpDecision::Patch,
        _ => BumpDecision::None,
    }
}

/// Resolve the bump for the whole commit set: breaking > feat > other user
/// facing types > none. An empty set resolves to [`BumpDecision::None`].
pub fn resolve_bump(
    commits: &[ClassifiedCommit],
    policy: &BumpPolicy,
) -> BumpDecision {
    let mut bump = BumpDecision::None;

    for commit in commits {
        bump = bump.max(commit_bump(commit));

        // Breaking changes always win
        if bump == BumpDecision::Major {
            return bump;
        }
    }

    if bump == BumpDecision::Minor && policy.suppress_minor() {
        debug!("pre-1.0 package: downgrading minor bump to patch");
        return BumpDecision::Patch;
    }

    bump
}
