// User settings
// Loaded from ~/.config/sps/settings.toml (or $SPS_CONFIG)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at an alternative settings file.
pub const CONFIG_ENV: &str = "SPS_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Default delimiter set when `-d` is not given.
    pub delimiters: Option<String>,

    /// Default log filter when `SPS_LOG` is not set.
    pub log: Option<String>,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sps")
            .join("settings.toml")
    }

    /// Load settings from the default location.
    ///
    /// A missing file yields defaults. A file that cannot be read or parsed also
    /// yields defaults, together with a message for the caller to report once
    /// logging is up.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> (Self, Option<String>) {
        if !path.exists() {
            return (Self::default(), None);
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                let msg = format!("Error reading {}: {}; using defaults", path.display(), e);
                return (Self::default(), Some(msg));
            }
        };

        match toml::from_str(&contents) {
            Ok(settings) => (settings, None),
            Err(e) => {
                let msg = format!("Error parsing {}: {}; using defaults", path.display(), e);
                (Self::default(), Some(msg))
            }
        }
    }
}
