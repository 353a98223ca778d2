use color_eyre::eyre::OptionExt;
use serde_json::{Value, json};

use crate::{result::Result, updater::traits::Updater};

/// Sets the root package version recorded in package-lock.json.
#[derive(Debug, Clone)]
pub struct PackageLock {
    path: String,
    version: String,
}

impl PackageLock {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }
}

impl Updater for PackageLock {
    fn path(&self) -> &str {
        &self.path
    }

    fn update(&self, content: &str) -> Result<String> {
        let mut doc: Value = serde_json::from_str(content)?;

        let obj = doc
            .as_object_mut()
            .ok_or_eyre(format!("{} is not a JSON object", self.path))?;

        obj.insert("version".into(), json!(self.version));

        // lockfileVersion >= 2 also records the root package under ""
        if let Some(root) = obj
            .get_mut("packages")
            .and_then(|p| p.get_mut(""))
            .and_then(|r| r.as_object_mut())
        {
            root.insert("version".into(), json!(self.version));
        }

        let formatted = serde_json::to_string_pretty(&doc)?;
        Ok(format!("{formatted}\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_top_level_and_root_package_versions() {
        let content = r#"{
  "name": "widgets",
  "version": "1.2.3",
  "lockfileVersion": 3,
  "packages": {
    "": {
      "name": "widgets",
      "version": "1.2.3"
    },
    "node_modules/left-pad": {
      "version": "1.2.3"
    }
  }
}"#;
        let updater = PackageLock::new("package-lock.json", "1.3.0");

        let updated = updater.update(content).unwrap();
        let doc: Value = serde_json::from_str(&updated).unwrap();

        assert_eq!(doc["version"], "1.3.0");
        assert_eq!(doc["packages"][""]["version"], "1.3.0");
        assert_eq!(doc["packages"]["node_modules/left-pad"]["version"], "1.2.3");
    }

    #[test]
    fn handles_lockfile_v1_without_packages() {
        let updater = PackageLock::new("package-lock.json", "2.0.0");
        let updated = updater
            .update(r#"{"name": "widgets", "version": "1.0.0", "lockfileVersion": 1}"#)
            .unwrap();
        let doc: Value = serde_json::from_str(&updated).unwrap();
        assert_eq!(doc["version"], "2.0.0");
    }
}
