//! Node.js releases: package.json plus package-lock.json.

pub mod package_json;
pub mod package_lock;

use crate::updater::{
    framework::{Framework, UpdateContext},
    traits::Updater,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Node;

impl Framework for Node {
    fn name(&self) -> &'static str {
        "node"
    }

    fn manifest_updaters(&self, ctx: &UpdateContext) -> Vec<Box<dyn Updater>> {
        let version = ctx.version.to_string();
        vec![
            Box::new(package_json::PackageJson::new(
                ctx.file_path("package.json"),
                version.clone(),
            )),
            Box::new(package_lock::PackageLock::new(
                ctx.file_path("package-lock.json"),
                version,
            )),
        ]
    }
}
