use crate::error::Result;
use crate::localization::{Language, Localizer};
use crate::store::fs::{read_json, write_json};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Appearance settings handed to the presentation layer at startup.
///
/// Colours are names understood by the renderer (e.g. `"cyan"`,
/// `"bright black"`); unknown names fall back to the renderer's default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Theme {
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_muted")]
    pub muted: String,
    #[serde(default = "default_success")]
    pub success: String,
    #[serde(default = "default_failure")]
    pub failure: String,
    #[serde(default = "default_tag")]
    pub tag: String,
}

fn default_accent() -> String {
    "cyan".to_string()
}

fn default_muted() -> String {
    "bright black".to_string()
}

fn default_success() -> String {
    "green".to_string()
}

fn default_failure() -> String {
    "red".to_string()
}

fn default_tag() -> String {
    "yellow".to_string()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: default_accent(),
            muted: default_muted(),
            success: default_success(),
            failure: default_failure(),
            tag: default_tag(),
        }
    }
}

/// Configuration for qunotes, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuNotesConfig {
    #[serde(default)]
    pub language: Language,

    /// Directory with extra `<code>.json` translation tables
    #[serde(default)]
    pub locales_dir: Option<PathBuf>,

    #[serde(default)]
    pub theme: Theme,
}

impl QuNotesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config = read_json(&config_dir.as_ref().join(CONFIG_FILENAME))?;
        Ok(config.unwrap_or_default())
    }

    /// Save config to the given directory, replacing the file atomically.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        write_json(&config_dir.as_ref().join(CONFIG_FILENAME), self)
    }

    /// Builds the localizer for the configured language, merging any tables
    /// from `locales_dir`.
    pub fn localizer(&self) -> Result<Localizer> {
        let localizer = Localizer::new(self.language);
        match &self.locales_dir {
            Some(dir) => localizer.load_dir(dir),
            None => Ok(localizer),
        }
    }

    /// Reads a setting by its command-line name.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "language" => Some(self.language.to_string()),
            "locales-dir" => Some(
                self.locales_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "theme.accent" => Some(self.theme.accent.clone()),
            "theme.muted" => Some(self.theme.muted.clone()),
            "theme.success" => Some(self.theme.success.clone()),
            "theme.failure" => Some(self.theme.failure.clone()),
            "theme.tag" => Some(self.theme.tag.clone()),
            _ => None,
        }
    }

    /// Updates a setting by its command-line name.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "language" => self.language = value.parse()?,
            "locales-dir" => {
                self.locales_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "theme.accent" => self.theme.accent = value.to_string(),
            "theme.muted" => self.theme.muted = value.to_string(),
            "theme.success" => self.theme.success = value.to_string(),
            "theme.failure" => self.theme.failure = value.to_string(),
            "theme.tag" => self.theme.tag = value.to_string(),
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = QuNotesConfig::default();
        assert_eq!(config.language, Language::En);
        assert_eq!(config.theme.accent, "cyan");
        assert!(config.locales_dir.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuNotesConfig::load(dir.path().join("nowhere")).unwrap();
        assert_eq!(config, QuNotesConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = QuNotesConfig::default();
        config.set("language", "ru").unwrap();
        config.set("theme.accent", "magenta").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = QuNotesConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.language, Language::Ru);
        assert_eq!(loaded.theme.accent, "magenta");
    }

    #[test]
    fn test_save_creates_dir_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("fresh");
        QuNotesConfig::default().save(&config_dir).unwrap();
        QuNotesConfig::default().save(&config_dir).unwrap();

        let names: Vec<_> = fs::read_dir(&config_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, [CONFIG_FILENAME]);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"theme": {"accent": "blue"}}"#,
        )
        .unwrap();

        let loaded = QuNotesConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.language, Language::En);
        assert_eq!(loaded.theme.accent, "blue");
        assert_eq!(loaded.theme.tag, "yellow");
    }

    #[test]
    fn test_unknown_key_and_bad_language() {
        let mut config = QuNotesConfig::default();
        assert!(config.set("colour", "red").is_err());
        assert!(config.set("language", "klingon").is_err());
        assert_eq!(config.get("nope"), None);
        assert_eq!(config.get("language").as_deref(), Some("en"));
    }

    #[test]
    fn test_localizer_follows_language() {
        let mut config = QuNotesConfig::default();
        config.set("language", "ru").unwrap();
        let localizer = config.localizer().unwrap();
        assert_eq!(localizer.language(), Language::Ru);
    }
}
