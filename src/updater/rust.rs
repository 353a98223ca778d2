//! Rust releases: Cargo.toml plus Cargo.lock.

pub mod cargo_lock;
pub mod cargo_toml;

use crate::updater::{
    framework::{Framework, UpdateContext},
    traits::Updater,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Rust;

impl Framework for Rust {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn manifest_updaters(&self, ctx: &UpdateContext) -> Vec<Box<dyn Updater>> {
        let version = ctx.version.to_string();
        vec![
            Box::new(cargo_toml::CargoToml::new(
                ctx.file_path("Cargo.toml"),
                version.clone(),
            )),
            Box::new(cargo_lock::CargoLock::new(
                ctx.file_path("Cargo.lock"),
                ctx.package_name.clone(),
                version,
            )),
        ]
    }
}
