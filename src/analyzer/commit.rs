use git_conventional::Commit as ConventionalCommit;
use log::*;
use regex::Regex;
use serde::Serialize;
use std::{fmt::Display, sync::LazyLock};

use crate::forge::request::ForgeCommit;

/// Matches a `BREAKING CHANGE` line anywhere in the message and captures
/// its description
static BREAKING_CHANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^BREAKING CHANGE:?[ \t]*(?P<description>.*)$").unwrap()
});

/// Conventional commit types recognised by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl CommitType {
    /// Look up a type tag, ignoring case. Returns None for tags outside the
    /// fixed set.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "feat" => Some(Self::Feat),
            "fix" => Some(Self::Fix),
            "docs" => Some(Self::Docs),
            "style" => Some(Self::Style),
            "refactor" => Some(Self::Refactor),
            "perf" => Some(Self::Perf),
            "test" => Some(Self::Test),
            "build" => Some(Self::Build),
            "ci" => Some(Self::Ci),
            "chore" => Some(Self::Chore),
            "revert" => Some(Self::Revert),
            _ => None,
        }
    }

    /// Whether commits of this type show up in release notes and warrant a
    /// release on their own.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Feat | Self::Fix | Self::Perf | Self::Revert)
    }
}

impl Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
            Self::Revert => "revert",
        };
        f.write_str(tag)
    }
}

/// A commit whose message follows the conventional commit format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedCommit {
    pub sha: String,
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub breaking: bool,
    /// Text of the `BREAKING CHANGE` footer, when present
    pub breaking_description: Option<String>,
    pub description: String,
}

/// Result of classifying one commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommit {
    Conventional(ClassifiedCommit),
    /// Message does not follow the format; excluded from bump and changelog
    Unparseable { sha: String, title: String },
}

impl ParsedCommit {
    /// Returns the classified commit if the message was conventional.
    pub fn conventional(self) -> Option<ClassifiedCommit> {
        match self {
            Self::Conventional(commit) => Some(commit),
            Self::Unparseable { .. } => None,
        }
    }
}

/// Classify a forge commit. Never fails: messages that do not match the
/// format come back as [`ParsedCommit::Unparseable`].
pub fn classify(forge_commit: &ForgeCommit) -> ParsedCommit {
    let raw_message = forge_commit.message.trim_end();
    let unparseable = || ParsedCommit::Unparseable {
        sha: forge_commit.sha.clone(),
        title: raw_message.lines().next().unwrap_or_default().to_string(),
    };

    // Bodies that break the footer grammar fall back to the header alone
    let header = raw_message.lines().next().unwrap_or_default();
    let cc = match ConventionalCommit::parse(raw_message) {
        Ok(cc) => cc,
        Err(err) => match ConventionalCommit::parse(header) {
            Ok(cc) => {
                debug!(
                    "commit {} body is not conventional ({err}), using header only",
                    short_sha(&forge_commit.sha)
                );
                cc
            }
            Err(_) => return unparseable(),
        },
    };

    let Some(commit_type) = CommitType::parse(cc.type_().as_str()) else {
        return unparseable();
    };

    let description = cc.description().to_string();

    let body_breaking = BREAKING_CHANGE_REGEX
        .captures(raw_message)
        .map(|caps| caps["description"].trim().to_string());

    let breaking_description = cc
        .breaking_description()
        .filter(|d| *d != description)
        .map(|d| d.to_string())
        .or_else(|| body_breaking.clone().filter(|d| !d.is_empty()));

    ParsedCommit::Conventional(ClassifiedCommit {
        sha: forge_commit.sha.clone(),
        commit_type,
        scope: cc.scope().map(|s| s.to_string()),
        breaking: cc.breaking() || body_breaking.is_some(),
        breaking_description,
        description,
    })
}

/// Classify every commit, keeping only the conventional ones in their
/// original order.
pub fn classify_all(commits: &[ForgeCommit]) -> Vec<ClassifiedCommit> {
    commits
        .iter()
        .filter_map(|forge_commit| match classify(forge_commit) {
            ParsedCommit::Conventional(commit) => {
                info!(
                    "processing commit: {} : {}{}: {}",
                    short_sha(&commit.sha),
                    commit.commit_type,
                    if commit.breaking { "!" } else { "" },
                    commit.description
                );
                Some(commit)
            }
            ParsedCommit::Unparseable { sha, title } => {
                debug!("skipping non-conventional commit {sha}: {title}");
                None
            }
        })
        .collect()
}

/// First 7 characters of a sha, as rendered in links.
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
