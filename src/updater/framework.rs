//! Release-type specific behavior, selected once at startup.
use semver::Version;
use std::{fmt::Debug, path::Path};

use crate::{
    analyzer::version::DEFAULT_SEED_VERSION, updater::traits::Updater,
};

/// Inputs shared by every updater for one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateContext {
    /// Package name as published, used to find lockfile entries
    pub package_name: String,
    /// Package directory relative to the repository root
    pub path: String,
    pub version: Version,
    /// Rendered changelog section for `version`
    pub notes: String,
}

impl UpdateContext {
    /// Path of `file_name` inside the package directory, relative to the
    /// repository root.
    pub fn file_path(&self, file_name: &str) -> String {
        Path::new(&self.path)
            .join(file_name)
            .display()
            .to_string()
            .replace("./", "")
    }
}

/// Per-ecosystem release behavior: which manifests carry the version and
/// what the first release is called.
pub trait Framework: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Version used when the package has never been released.
    fn seed_version(&self) -> Version {
        DEFAULT_SEED_VERSION
    }

    /// Manifest updaters, primary manifest first.
    fn manifest_updaters(&self, ctx: &UpdateContext) -> Vec<Box<dyn Updater>>;
}

/// Changelog-only releases for repositories without a manifest.
#[derive(Debug, Default, Clone, Copy)]
pub struct Simple;

impl Framework for Simple {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn manifest_updaters(&self, _ctx: &UpdateContext) -> Vec<Box<dyn Updater>> {
        vec![]
    }
}
