// SPDX-License-Identifier: MPL-2.0

//! User configuration
//!
//! Stored as JSON in the platform config directory
//! (`~/.config/supercam/config.json` on Linux). A missing file means
//! defaults; unknown fields are ignored and missing fields take defaults.

use crate::backends::camera::CaptureSource;
use crate::constants::directories;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Config format version
    pub version: u32,
    /// Photo directory override (default: app data dir)
    pub photo_dir: Option<PathBuf>,
    /// Where captures are written before saving (default: system temp dir)
    pub capture_dir: Option<PathBuf>,
    /// What the virtual camera captures
    pub capture_source: CaptureSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            photo_dir: None,
            capture_dir: None,
            capture_source: CaptureSource::default(),
        }
    }
}

impl Config {
    /// Standard config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(directories::APP_FOLDER)
                .join(directories::CONFIG_FILE_NAME)
        })
    }

    /// Load from the standard location, falling back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Read(path.to_path_buf(), e.to_string())),
        };

        let config: Config = serde_json::from_str(&text)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))?;
        debug!(path = %path.display(), version = config.version, "Config loaded");
        Ok(config)
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Write(parent.to_path_buf(), e.to_string()))?;
        }

        let text = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Write(path.to_path_buf(), e.to_string()))?;
        std::fs::write(path, text)
            .map_err(|e| ConfigError::Write(path.to_path_buf(), e.to_string()))?;

        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Photo directory: override, else `<data dir>/supercam/photos`
    pub fn photo_directory(&self) -> PathBuf {
        if let Some(dir) = &self.photo_dir {
            return dir.clone();
        }
        dirs::data_local_dir()
            .map(|dir| {
                dir.join(directories::APP_FOLDER)
                    .join(directories::PHOTOS_FOLDER)
            })
            .unwrap_or_else(|| PathBuf::from(directories::FALLBACK_PHOTOS_DIR))
    }

    /// Capture directory: override, else `<temp dir>/supercam`
    pub fn capture_directory(&self) -> PathBuf {
        self.capture_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(directories::APP_FOLDER))
    }
}
