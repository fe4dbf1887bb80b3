//! User settings for Tracefinity
//!
//! Settings are stored as JSON or TOML, chosen by file extension. Every field
//! has a default, so a partial file only overrides the keys it contains.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use tracefinity_core::constants::{
    DEFAULT_BED_SIZE_MM, DEFAULT_HISTORY_DEPTH, DEFAULT_SNAP_STEP_MM, REGENERATE_DEBOUNCE_MS,
    SAVE_DEBOUNCE_MS, SMOOTH_LEVEL_DEBOUNCE_MS,
};
use tracefinity_core::model::BinConfig;

use crate::error::{SettingsError, SettingsResult};

/// On-disk settings format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    Toml,
}

impl SettingsFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(SettingsFormat::Json),
            Some("toml") => Ok(SettingsFormat::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Print bed edge length in mm, used for new bins
    pub bed_size: f64,
    /// Snap grid step in mm
    pub snap_step_mm: f64,
    /// Whether snapping starts enabled
    pub snap_enabled: bool,
    /// Undo snapshots kept per editor
    pub history_depth: usize,
    pub save_debounce_ms: u64,
    pub regenerate_debounce_ms: u64,
    pub smooth_level_debounce_ms: u64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            bed_size: DEFAULT_BED_SIZE_MM,
            snap_step_mm: DEFAULT_SNAP_STEP_MM,
            snap_enabled: true,
            history_depth: DEFAULT_HISTORY_DEPTH,
            save_debounce_ms: SAVE_DEBOUNCE_MS,
            regenerate_debounce_ms: REGENERATE_DEBOUNCE_MS,
            smooth_level_debounce_ms: SMOOTH_LEVEL_DEBOUNCE_MS,
        }
    }
}

impl UserSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = SettingsFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let settings: Self = match format {
            SettingsFormat::Json => serde_json::from_str(&content)?,
            SettingsFormat::Toml => toml::from_str(&content)?,
        };
        settings.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match SettingsFormat::from_path(path)? {
            SettingsFormat::Json => serde_json::to_string_pretty(self)?,
            SettingsFormat::Toml => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.bed_size.is_finite() && self.bed_size > 0.0) {
            return Err(SettingsError::invalid("bed_size", "must be > 0"));
        }
        if !(self.snap_step_mm.is_finite() && self.snap_step_mm > 0.0) {
            return Err(SettingsError::invalid("snap_step_mm", "must be > 0"));
        }
        if self.history_depth == 0 {
            return Err(SettingsError::invalid("history_depth", "must be > 0"));
        }
        Ok(())
    }

    /// Configuration for a newly created bin.
    pub fn new_bin_config(&self) -> BinConfig {
        BinConfig::with_bed_size(self.bed_size)
    }

    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    pub fn regenerate_delay(&self) -> Duration {
        Duration::from_millis(self.regenerate_debounce_ms)
    }

    pub fn smooth_level_delay(&self) -> Duration {
        Duration::from_millis(self.smooth_level_debounce_ms)
    }
}
