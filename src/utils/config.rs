//! Application configuration

use crate::downloader::presets::{AUDIO_PRESETS, QUALITY_PRESETS};
use crate::utils::error::TubefetchError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Application settings, persisted as JSON in the config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Download location
    pub download_location: PathBuf,

    /// Explicit ffmpeg binary (or directory), overrides discovery
    pub ffmpeg_location: Option<PathBuf>,

    /// Explicit yt-dlp binary, overrides discovery
    pub ytdlp_location: Option<PathBuf>,

    /// Last used video quality label
    pub video_quality: String,

    /// Last used audio format label
    pub audio_format: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_location: super::get_downloads_dir(),
            ffmpeg_location: None,
            ytdlp_location: None,
            video_quality: QUALITY_PRESETS[0].label.to_string(),
            audio_format: AUDIO_PRESETS[0].label.to_string(),
        }
    }
}

impl AppSettings {
    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(&super::get_settings_path())
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read_from(path) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                warn!("Ignoring unreadable settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    fn read_from(path: &Path) -> Result<Self, TubefetchError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), TubefetchError> {
        self.save_to(&super::get_settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), TubefetchError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Replace preset labels that are no longer in the catalogs
    fn sanitized(mut self) -> Self {
        if !QUALITY_PRESETS.iter().any(|p| p.label == self.video_quality) {
            self.video_quality = QUALITY_PRESETS[0].label.to_string();
        }
        if !AUDIO_PRESETS.iter().any(|p| p.label == self.audio_format) {
            self.audio_format = AUDIO_PRESETS[0].label.to_string();
        }
        self
    }
}
