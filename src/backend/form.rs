//! The download form and its translation into a request

use crate::downloader::presets::{find_audio_preset, find_quality_preset};
use crate::downloader::request::{DownloadMode, DownloadRequest};
use crate::utils::error::ValidationError;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Snapshot of the inputs at the moment Download is pressed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadForm {
    pub url: String,
    pub destination: String,
    pub mode: DownloadMode,
    /// Selected label in the quality pick list (Video tab)
    pub video_quality: String,
    /// Selected label in the audio pick list (Audio tab)
    pub audio_format: String,
}

impl DownloadForm {
    /// Validate the inputs and resolve the active tab's preset.
    ///
    /// Only the preset of the active tab is consulted.
    pub fn to_request(&self) -> Result<DownloadRequest, ValidationError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingUrl);
        }

        let destination = self.destination.trim();
        if destination.is_empty() {
            return Err(ValidationError::MissingDestination);
        }
        let destination = absolute_destination(destination);

        match self.mode {
            DownloadMode::Video => {
                let preset = find_quality_preset(&self.video_quality)
                    .ok_or_else(|| ValidationError::UnknownVideoQuality(self.video_quality.clone()))?;
                Ok(DownloadRequest::video(url, destination, preset))
            }
            DownloadMode::Audio => {
                let preset = find_audio_preset(&self.audio_format)
                    .ok_or_else(|| ValidationError::UnknownAudioFormat(self.audio_format.clone()))?;
                Ok(DownloadRequest::audio(url, destination, preset))
            }
        }
    }
}

/// Expand `~` and make the path absolute. No existence check.
fn absolute_destination(raw: &str) -> PathBuf {
    let expanded = match raw.strip_prefix("~/").or_else(|| (raw == "~").then_some("")) {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(raw)),
        None => PathBuf::from(raw),
    };

    Path::new(&expanded)
        .absolutize()
        .map(|p| p.into_owned())
        .unwrap_or(expanded)
}
