//! Settings file location and lifecycle.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::UserSettings;
use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "tracefinity";
const SETTINGS_FILE: &str = "settings.json";

/// Loads and saves [`UserSettings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    path: PathBuf,
    settings: UserSettings,
}

impl SettingsManager {
    /// Platform configuration directory for Tracefinity.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| SettingsError::ConfigDirectory("no platform config directory".into()))
    }

    /// Create the configuration directory if it does not exist.
    pub fn ensure_config_dir() -> SettingsResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)
            .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", dir.display(), e)))?;
        Ok(dir)
    }

    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE))
    }

    /// Open the settings in the platform configuration directory.
    pub fn open_default() -> SettingsResult<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open settings at `path`. A missing file yields defaults; an unreadable
    /// or invalid one is an error.
    pub fn open(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let settings = if path.exists() {
            UserSettings::load_from_file(&path)?
        } else {
            info!("No settings at {}, using defaults", path.display());
            UserSettings::default()
        };
        Ok(Self { path, settings })
    }

    /// Like [`SettingsManager::open`], but falls back to defaults on any error.
    pub fn open_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(path.clone()) {
            Ok(manager) => manager,
            Err(e) => {
                warn!("Ignoring settings at {}: {}", path.display(), e);
                Self {
                    path,
                    settings: UserSettings::default(),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    /// Replace the settings after validating them. Not written until [`SettingsManager::save`].
    pub fn update(&mut self, settings: UserSettings) -> SettingsResult<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.settings.save_to_file(&self.path)?;
        info!("Settings saved to {}", self.path.display());
        Ok(())
    }

    pub fn restore_defaults(&mut self) {
        self.settings = UserSettings::default();
    }
}
