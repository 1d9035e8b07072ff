//! User settings persisted as JSON under `~/.kinovault/`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// User-facing settings. Unknown keys in the file are ignored, missing keys
/// fall back to defaults, so older config files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Token for api.kinopoisk.dev requests.
    pub api_token: String,
    /// File name format for created person notes.
    pub file_name_format: String,
    /// Vault folder where person notes live; used as the link folder path.
    pub person_folder: String,
    /// Template file applied by the note-creation collaborator.
    pub template_file: String,
    /// Trigger a search when an empty note appears in the person folder.
    pub auto_fill_on_create: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            file_name_format: "{{name}}".to_string(),
            person_folder: String::new(),
            template_file: String::new(),
            auto_fill_on_create: true,
        }
    }
}

/// Canonical config file path.
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".kinovault")
        .join("config.json")
}

impl Settings {
    /// Load settings from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.file_name_format, "{{name}}");
        assert!(settings.api_token.is_empty());
        assert!(settings.auto_fill_on_create);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Settings::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let settings = Settings {
            api_token: "secret".to_string(),
            person_folder: "People".to_string(),
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "apiToken": "secret" }"#).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.api_token, "secret");
        assert_eq!(loaded.file_name_format, "{{name}}");
        assert!(loaded.auto_fill_on_create);
    }
}
