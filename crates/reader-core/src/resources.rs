use std::{fs, path::Path};

use toml::{Table, Value};
use tracing::warn;

use crate::config;

const DEFAULT_RESOURCES: &str = r#"
[dialog.button]
resetPosition = "Reset position"
enterPosition = "Go to page"
"#;

/// Localized strings looked up by `/`-separated keys such as
/// `dialog/button/resetPosition`.
#[derive(Debug, Clone)]
pub struct Resources {
    table: Table,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            table: toml::from_str(DEFAULT_RESOURCES).unwrap_or_default(),
        }
    }
}

impl Resources {
    /// Built-in strings overlaid with `<config>/resources.toml` when present.
    pub fn load() -> Self {
        let mut resources = Self::default();
        if let Some(path) = config::config_root().map(|dir| dir.join("resources.toml")) {
            resources.overlay_file(&path);
        }
        resources
    }

    pub fn overlay_file(&mut self, path: &Path) {
        let Ok(contents) = fs::read_to_string(path) else {
            return;
        };
        match toml::from_str::<Table>(&contents) {
            Ok(overrides) => merge(&mut self.table, overrides),
            Err(err) => warn!(path = %path.display(), "ignoring malformed resources: {err}"),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let mut parts = key.split('/').filter(|p| !p.is_empty());
        let mut value = self.table.get(parts.next()?)?;
        for part in parts {
            value = value.as_table()?.get(part)?;
        }
        value.as_str()
    }

    /// Like [`Resources::get`], falling back to the key's last segment.
    pub fn value(&self, key: &str) -> String {
        self.get(key)
            .map(str::to_string)
            .unwrap_or_else(|| key.rsplit('/').next().unwrap_or(key).to_string())
    }
}

fn merge(base: &mut Table, overrides: Table) {
    for (key, value) in overrides {
        match value {
            Value::Table(incoming) => match base.get_mut(&key) {
                Some(Value::Table(existing)) => merge(existing, incoming),
                _ => {
                    base.insert(key, Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_contain_button_labels() {
        let r = Resources::default();
        assert_eq!(r.value("dialog/button/resetPosition"), "Reset position");
        assert_eq!(r.value("dialog/button/enterPosition"), "Go to page");
        assert_eq!(r.table.len(), 1);
        let buttons = r.table.get("dialog").and_then(|v| v.get("button"));
        assert_eq!(buttons.and_then(|v| v.as_table()).map(|t| t.len()), Some(2));
    }

    #[test]
    fn missing_key_falls_back_to_last_segment() {
        let r = Resources::default();
        assert_eq!(r.get("dialog/button/nothing"), None);
        assert_eq!(r.value("dialog/button/nothing"), "nothing");
    }

    #[test]
    fn overlay_replaces_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources.toml");
        fs::write(&path, "[dialog.button]\nresetPosition = \"Zurück\"\n").unwrap();
        let mut r = Resources::default();
        r.overlay_file(&path);
        assert_eq!(r.value("dialog/button/resetPosition"), "Zurück");
        assert_eq!(r.value("dialog/button/enterPosition"), "Go to page");
    }
}
