use color_eyre::eyre::OptionExt;
use log::*;
use serde_json::{Value, json};

use crate::{result::Result, updater::traits::Updater};

/// Sets the `version` field of a package.json file.
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: String,
    version: String,
}

impl PackageJson {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }
}

impl Updater for PackageJson {
    fn path(&self) -> &str {
        &self.path
    }

    fn update(&self, content: &str) -> Result<String> {
        let mut doc: Value = serde_json::from_str(content)?;

        let obj = doc
            .as_object_mut()
            .ok_or_eyre(format!("{} is not a JSON object", self.path))?;

        if let Some(old) = obj.get("version") {
            info!("updating {} version: {} -> {}", self.path, old, self.version);
        }

        obj.insert("version".into(), json!(self.version));

        let formatted = serde_json::to_string_pretty(&doc)?;
        Ok(format!("{formatted}\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_version_and_keeps_key_order() {
        let content = r#"{
  "name": "widgets",
  "version": "1.2.3",
  "dependencies": {
    "left-pad": "^1.0.0"
  }
}
"#;
        let updater = PackageJson::new("package.json", "1.3.0");

        let updated = updater.update(content).unwrap();

        assert_eq!(
            updated,
            r#"{
  "name": "widgets",
  "version": "1.3.0",
  "dependencies": {
    "left-pad": "^1.0.0"
  }
}
"#
        );
    }

    #[test]
    fn adds_missing_version() {
        let updater = PackageJson::new("package.json", "1.0.0");
        let updated = updater.update(r#"{"name": "widgets"}"#).unwrap();
        let doc: Value = serde_json::from_str(&updated).unwrap();
        assert_eq!(doc["version"], "1.0.0");
    }

    #[test]
    fn rejects_non_object_documents() {
        let updater = PackageJson::new("package.json", "1.0.0");
        assert!(updater.update("[1, 2, 3]").is_err());
        assert!(updater.update("not json").is_err());
    }
}
