use crate::{result::Result, updater::traits::Updater};

/// Top level heading kept at the start of every changelog file.
pub const CHANGELOG_HEADER: &str = "# Changelog";

/// Prepends release notes to a changelog file, below its header.
#[derive(Debug, Clone)]
pub struct ChangelogUpdater {
    path: String,
    notes: String,
}

impl ChangelogUpdater {
    pub fn new(path: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            notes: notes.into(),
        }
    }
}

impl Updater for ChangelogUpdater {
    fn path(&self) -> &str {
        &self.path
    }

    fn create_if_missing(&self) -> bool {
        true
    }

    fn update(&self, content: &str) -> Result<String> {
        let existing = content.trim_start();
        let previous_entries = existing
            .strip_prefix(CHANGELOG_HEADER)
            .map(str::trim_start)
            .unwrap_or(existing)
            .trim_end();

        let mut updated =
            format!("{CHANGELOG_HEADER}\n\n{}\n", self.notes.trim());

        if !previous_entries.is_empty() {
            updated.push('\n');
            updated.push_str(previous_entries);
            updated.push('\n');
        }

        Ok(updated)
    }
}
