use log::*;
use toml_edit::{DocumentMut, value};

use crate::{result::Result, updater::traits::Updater};

/// Updates the lockfile entry for the released crate.
#[derive(Debug, Clone)]
pub struct CargoLock {
    path: String,
    package_name: String,
    version: String,
}

impl CargoLock {
    pub fn new(
        path: impl Into<String>,
        package_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            package_name: package_name.into(),
            version: version.into(),
        }
    }
}

impl Updater for CargoLock {
    fn path(&self) -> &str {
        &self.path
    }

    fn update(&self, content: &str) -> Result<String> {
        let mut doc = content.parse::<DocumentMut>()?;

        let found = doc
            .get_mut("package")
            .and_then(|p| p.as_array_of_tables_mut())
            .and_then(|packages| {
                packages.iter_mut().find(|p| {
                    p.get("name").and_then(|n| n.as_str())
                        == Some(self.package_name.as_str())
                })
            });

        match found {
            Some(package) => package["version"] = value(self.version.as_str()),
            None => warn!(
                "{} has no entry for package {}",
                self.path, self.package_name
            ),
        }

        Ok(doc.to_string())
    }
}
