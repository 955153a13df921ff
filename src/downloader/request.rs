//! Download requests and the configuration handed to the downloader

use crate::downloader::presets::{AudioCodec, AudioPreset, AudioQuality, QualityPreset, AUDIO_SELECTOR};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Output file name pattern, relative to the destination directory
pub const OUTPUT_FILE_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Container used when merging separate video and audio streams
pub const VIDEO_CONTAINER: &str = "mp4";

/// Audio track of video downloads is normalized to AAC at this bitrate
pub const VIDEO_AUDIO_CODEC: &str = "aac";
pub const VIDEO_AUDIO_BITRATE_KBPS: u32 = 192;

/// Which tab the request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadMode {
    #[default]
    Video,
    Audio,
}

impl DownloadMode {
    pub const ALL: [DownloadMode; 2] = [DownloadMode::Video, DownloadMode::Audio];

    /// Tab caption
    pub fn label(&self) -> &'static str {
        match self {
            DownloadMode::Video => "Video",
            DownloadMode::Audio => "Audio Only",
        }
    }
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Step run by the post-processor after the raw streams are fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcessing {
    /// Drop the video stream and transcode the audio
    ExtractAudio {
        codec: AudioCodec,
        quality: AudioQuality,
    },
    /// Keep the video stream as is, re-encode only the audio track
    ReencodeAudio {
        codec: &'static str,
        bitrate_kbps: u32,
    },
}

/// One download, built fresh from the form on every click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub id: Uuid,
    pub url: String,
    pub destination: PathBuf,
    pub mode: DownloadMode,
    pub selector: String,
    pub post_processing: PostProcessing,
}

impl DownloadRequest {
    pub fn video(url: impl Into<String>, destination: impl Into<PathBuf>, preset: &QualityPreset) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            destination: destination.into(),
            mode: DownloadMode::Video,
            selector: preset.selector.to_string(),
            post_processing: PostProcessing::ReencodeAudio {
                codec: VIDEO_AUDIO_CODEC,
                bitrate_kbps: VIDEO_AUDIO_BITRATE_KBPS,
            },
        }
    }

    pub fn audio(url: impl Into<String>, destination: impl Into<PathBuf>, preset: &AudioPreset) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            destination: destination.into(),
            mode: DownloadMode::Audio,
            selector: AUDIO_SELECTOR.to_string(),
            post_processing: PostProcessing::ExtractAudio {
                codec: preset.codec,
                quality: preset.quality,
            },
        }
    }

    /// Build the downloader configuration for this request
    pub fn options(&self) -> DownloadOptions {
        let output_template = self
            .destination
            .join(OUTPUT_FILE_TEMPLATE)
            .to_string_lossy()
            .to_string();

        let (extract_audio, merge_output_format) = match self.mode {
            DownloadMode::Audio => (true, None),
            DownloadMode::Video => (false, Some(VIDEO_CONTAINER.to_string())),
        };

        DownloadOptions {
            format: self.selector.clone(),
            output_template,
            quiet: true,
            no_warnings: true,
            extract_audio,
            merge_output_format,
            post_processors: vec![self.post_processing.clone()],
        }
    }
}

/// Configuration bag understood by a [`MediaDownloader`](crate::downloader::MediaDownloader)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Format selector expression
    pub format: String,
    /// Full output path template
    pub output_template: String,
    /// Suppress the downloader's own console output
    pub quiet: bool,
    pub no_warnings: bool,
    /// Keep only the audio stream
    pub extract_audio: bool,
    /// Container for merged video+audio output
    pub merge_output_format: Option<String>,
    pub post_processors: Vec<PostProcessing>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::presets::{find_audio_preset, find_quality_preset};

    #[test]
    fn video_request_options() {
        let preset = find_quality_preset("1080p").unwrap();
        let request = DownloadRequest::video("https://example.com/v", "/tmp/out", preset);
        let options = request.options();

        assert_eq!(options.format, preset.selector);
        assert_eq!(options.output_template, "/tmp/out/%(title)s.%(ext)s");
        assert!(options.quiet && options.no_warnings);
        assert!(!options.extract_audio);
        assert_eq!(options.merge_output_format.as_deref(), Some("mp4"));
        assert_eq!(
            options.post_processors,
            vec![PostProcessing::ReencodeAudio {
                codec: "aac",
                bitrate_kbps: 192
            }]
        );
    }

    #[test]
    fn audio_request_options() {
        let preset = find_audio_preset("OPUS").unwrap();
        let request = DownloadRequest::audio("https://example.com/v", "/tmp/out", preset);
        let options = request.options();

        assert_eq!(options.format, "bestaudio/best");
        assert!(options.extract_audio);
        assert!(options.merge_output_format.is_none());
        assert_eq!(
            options.post_processors,
            vec![PostProcessing::ExtractAudio {
                codec: AudioCodec::Opus,
                quality: AudioQuality::Best
            }]
        );
    }

    #[test]
    fn requests_get_distinct_ids() {
        let preset = find_quality_preset("360p").unwrap();
        let a = DownloadRequest::video("u", "/tmp", preset);
        let b = DownloadRequest::video("u", "/tmp", preset);
        assert_ne!(a.id, b.id);
    }
}
