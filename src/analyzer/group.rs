use serde::Serialize;

use crate::analyzer::commit::{ClassifiedCommit, CommitType};

/// Changelog sections, declared in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Group {
    Breaking,
    Feat,
    Fix,
    Perf,
    Revert,
}

impl Group {
    /// All groups in render order.
    pub const ALL: [Group; 5] = [
        Group::Breaking,
        Group::Feat,
        Group::Fix,
        Group::Perf,
        Group::Revert,
    ];

    /// Section heading as it appears in the changelog.
    pub fn heading(&self) -> &'static str {
        match self {
            Group::Breaking => "⚠ BREAKING CHANGES",
            Group::Feat => "Features",
            Group::Fix => "Bug Fixes",
            Group::Perf => "Performance Improvements",
            Group::Revert => "Reverts",
        }
    }

    /// Section a commit belongs to, checking breaking changes first. None
    /// for types that are kept out of release notes.
    pub fn for_commit(commit: &ClassifiedCommit) -> Option<Group> {
        if commit.breaking {
            return Some(Group::Breaking);
        }

        match commit.commit_type {
            CommitType::Feat => Some(Group::Feat),
            CommitType::Fix => Some(Group::Fix),
            CommitType::Perf => Some(Group::Perf),
            CommitType::Revert => Some(Group::Revert),
            CommitType::Docs
            | CommitType::Style
            | CommitType::Refactor
            | CommitType::Test
            | CommitType::Build
            | CommitType::Ci
            | CommitType::Chore => None,
        }
    }
}

impl Serialize for Group {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.heading())
    }
}
