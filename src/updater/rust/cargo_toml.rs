use color_eyre::eyre::eyre;
use toml_edit::{DocumentMut, Item, value};

use crate::{result::Result, updater::traits::Updater};

/// Sets the package version in a Cargo.toml, following
/// `version.workspace = true` to `[workspace.package]`.
#[derive(Debug, Clone)]
pub struct CargoToml {
    path: String,
    version: String,
}

impl CargoToml {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }
}

fn is_string(item: Option<&Item>) -> bool {
    item.and_then(|i| i.as_str()).is_some()
}

impl Updater for CargoToml {
    fn path(&self) -> &str {
        &self.path
    }

    fn update(&self, content: &str) -> Result<String> {
        let mut doc = content.parse::<DocumentMut>()?;

        let package_version =
            doc.get("package").and_then(|p| p.get("version"));

        if is_string(package_version) {
            doc["package"]["version"] = value(self.version.as_str());
            return Ok(doc.to_string());
        }

        let workspace_version = doc
            .get("workspace")
            .and_then(|w| w.get("package"))
            .and_then(|p| p.get("version"));

        if is_string(workspace_version) {
            doc["workspace"]["package"]["version"] = value(self.version.as_str());
            return Ok(doc.to_string());
        }

        Err(eyre!("no package version found in {}", self.path))
    }
}
