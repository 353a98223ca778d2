//! Builds the ordered set of file updates for a release.
use log::*;

use crate::updater::{
    changelog::ChangelogUpdater,
    framework::{Framework, UpdateContext},
    traits::Updater,
};

/// Changelog file name inside the package directory.
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Updates for one release: the changelog first, then the framework's
/// manifests in the order it declares them.
pub fn build_update_set(
    framework: &dyn Framework,
    ctx: &UpdateContext,
) -> Vec<Box<dyn Updater>> {
    let mut updates: Vec<Box<dyn Updater>> = vec![Box::new(
        ChangelogUpdater::new(ctx.file_path(CHANGELOG_FILE), ctx.notes.clone()),
    )];

    updates.extend(framework.manifest_updaters(ctx));

    debug!(
        "{} updates for {} release {}: {:?}",
        updates.len(),
        framework.name(),
        ctx.version,
        updates.iter().map(|u| u.path()).collect::<Vec<&str>>()
    );

    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updater::{framework::Simple, node::Node, rust::Rust};
    use semver::Version;

    fn ctx(path: &str) -> UpdateContext {
        UpdateContext {
            package_name: "widgets".into(),
            path: path.into(),
            version: Version::new(1, 3, 0),
            notes: "## 1.3.0 (2024-05-01)\n\n### Features\n\n* add widget"
                .into(),
        }
    }

    fn paths(updates: &[Box<dyn Updater>]) -> Vec<&str> {
        updates.iter().map(|u| u.path()).collect()
    }

    #[test]
    fn node_updates_changelog_then_manifests() {
        let updates = build_update_set(&Node, &ctx("."));
        assert_eq!(
            paths(&updates),
            vec!["CHANGELOG.md", "package.json", "package-lock.json"]
        );
    }

    #[test]
    fn rust_updates_changelog_then_manifests() {
        let updates = build_update_set(&Rust, &ctx("crates/widgets"));
        assert_eq!(
            paths(&updates),
            vec![
                "crates/widgets/CHANGELOG.md",
                "crates/widgets/Cargo.toml",
                "crates/widgets/Cargo.lock"
            ]
        );
    }

    #[test]
    fn simple_updates_changelog_only() {
        let updates = build_update_set(&Simple, &ctx("."));
        assert_eq!(paths(&updates), vec!["CHANGELOG.md"]);
        assert!(updates[0].create_if_missing());
    }

    #[test]
    fn updaters_apply_current_contents() {
        let updates = build_update_set(&Node, &ctx("."));

        let changelog = updates[0].update("# Changelog\n").unwrap();
        assert!(changelog.contains("* add widget"));

        let package_json = updates[1]
            .update(r#"{"name": "widgets", "version": "1.2.3"}"#)
            .unwrap();
        assert!(package_json.contains(r#""version": "1.3.0""#));
    }
}
