// Application settings
// Loaded from ~/.config/editgrid/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User settings for grid interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// A printable keystroke on the selected cell starts an edit
    pub type_to_edit: bool,

    /// Select existing cell content when an edit starts via typing,
    /// so the keystroke replaces it
    pub select_on_edit: bool,

    /// Log filter directive (overridden by EDITGRID_LOG)
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            type_to_edit: true,
            select_on_edit: true,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Path to the settings file: ~/.config/editgrid/settings.json
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("editgrid").join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults on any failure
    /// (missing file, unreadable file, parse error).
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    fn load_from(path: &PathBuf) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save settings to disk, creating the directory if needed.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::settings_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.type_to_edit);
        assert!(s.select_on_edit);
        assert_eq!(s.log_filter, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"type_to_edit": false}"#).unwrap();
        assert!(!s.type_to_edit);
        assert!(s.select_on_edit);
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut s = Settings::default();
        s.select_on_edit = false;
        fs::write(&path, serde_json::to_string(&s).unwrap()).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert!(!loaded.select_on_edit);
        assert!(loaded.type_to_edit);
    }
}
