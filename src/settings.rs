use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::SonifierConfig;

/// Returns the path to the settings file: `~/.config/pointer-sonifier/settings.json`
pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("pointer-sonifier");
    path.push("settings.json");
    path
}

/// Persisted application settings.
///
/// Serialized as JSON to the platform config directory.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // Mapping bounds and waveform
    pub sonifier: SonifierConfig,

    // Audio output (None = host default)
    pub output_device: Option<String>,

    // Window
    pub show_hud: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            sonifier: SonifierConfig::default(),
            output_device: None,
            show_hud: true,
        }
    }
}

impl AppSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) {
        self.save_to(&settings_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to write settings: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Waveform;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pointer-sonifier-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = scratch_dir("missing");
        assert_eq!(AppSettings::load_from(&dir.join("settings.json")), AppSettings::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = scratch_dir("malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("saved");
        let path = dir.join("nested").join("settings.json");

        let mut settings = AppSettings::default();
        settings.sonifier.waveform = Waveform::Sawtooth;
        settings.sonifier.max_frequency = 1200.0;
        settings.output_device = Some("Speakers".to_string());
        settings.show_hud = false;
        settings.save_to(&path);

        assert_eq!(AppSettings::load_from(&path), settings);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_path_ends_with_app_dir() {
        assert!(settings_path().ends_with("pointer-sonifier/settings.json"));
    }
}
