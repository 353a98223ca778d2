use std::fmt::Debug;

use crate::result::Result;

/// A single file mutation needed for a release.
///
/// Updaters do no I/O: the forge loads the file's current content, calls
/// [`Updater::update`], and writes the result to the release branch.
pub trait Updater: Debug + Send + Sync {
    /// Path of the target file relative to the repository root.
    fn path(&self) -> &str;

    /// Whether the file should be created from empty content when it does
    /// not exist yet. Updaters that return false are skipped for missing
    /// files.
    fn create_if_missing(&self) -> bool {
        false
    }

    /// Produce the new file contents from the current ones.
    fn update(&self, content: &str) -> Result<String>;
}
