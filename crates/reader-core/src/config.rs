use std::{fs, path::Path, path::PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const QUALIFIER: &str = "com";
pub const ORGANIZATION: &str = "sean";
pub const APPLICATION: &str = "librarian";

pub const MIN_COLUMN_WIDTH: u16 = 20;
pub const MAX_COLUMN_WIDTH: u16 = 200;

pub fn config_root() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).map(|p| p.config_dir().to_path_buf())
}

pub fn settings_path() -> Option<PathBuf> {
    config_root().map(|dir| dir.join("settings.toml"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub column_width: u16,
    pub log_level: String,
    pub show_help_on_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            column_width: 72,
            log_level: "info".to_string(),
            show_help_on_start: false,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        settings_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Reads settings from `path`; a missing or malformed file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str::<Settings>(&contents) {
            Ok(settings) => settings.normalized(),
            Err(err) => {
                warn!(path = %path.display(), "ignoring malformed settings: {err}");
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        self.column_width = self
            .column_width
            .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults_and_clamps_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "column_width = 5\n").unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.column_width, MIN_COLUMN_WIDTH);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "column_width = \"wide\"").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
