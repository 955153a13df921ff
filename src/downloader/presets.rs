//! Fixed quality and audio-format catalogs

use std::fmt;

/// A named yt-dlp format selector for the Video tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityPreset {
    pub label: &'static str,
    pub selector: &'static str,
}

/// Target codec for audio extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCodec {
    Mp3,
    M4a,
    Opus,
    Wav,
}

impl AudioCodec {
    /// Name understood by `--audio-format`
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCodec::Mp3 => "mp3",
            AudioCodec::M4a => "m4a",
            AudioCodec::Opus => "opus",
            AudioCodec::Wav => "wav",
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audio quality: a bitrate ceiling or the encoder's best setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioQuality {
    Best,
    Kbps(u32),
}

impl AudioQuality {
    /// Value for `--audio-quality`. `0` is yt-dlp's best VBR setting.
    pub fn as_ytdlp_arg(&self) -> String {
        match self {
            AudioQuality::Best => "0".to_string(),
            AudioQuality::Kbps(kbps) => format!("{}K", kbps),
        }
    }
}

impl fmt::Display for AudioQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioQuality::Best => f.write_str("best"),
            AudioQuality::Kbps(kbps) => write!(f, "{}", kbps),
        }
    }
}

/// A named audio extraction setting for the Audio tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioPreset {
    pub label: &'static str,
    pub codec: AudioCodec,
    pub quality: AudioQuality,
}

/// Selector used for every audio-only download; the preset only drives post-processing.
pub const AUDIO_SELECTOR: &str = "bestaudio/best";

pub const QUALITY_PRESETS: &[QualityPreset] = &[
    QualityPreset {
        label: "Best Quality",
        selector: "bestvideo+bestaudio/best",
    },
    QualityPreset {
        label: "1080p",
        selector: "bestvideo[height<=1080]+bestaudio/best[height<=1080]",
    },
    QualityPreset {
        label: "720p",
        selector: "bestvideo[height<=720]+bestaudio/best[height<=720]",
    },
    QualityPreset {
        label: "480p",
        selector: "bestvideo[height<=480]+bestaudio/best[height<=480]",
    },
    QualityPreset {
        label: "360p",
        selector: "bestvideo[height<=360]+bestaudio/best[height<=360]",
    },
];

pub const AUDIO_PRESETS: &[AudioPreset] = &[
    AudioPreset {
        label: "MP3 (Best Quality)",
        codec: AudioCodec::Mp3,
        quality: AudioQuality::Best,
    },
    AudioPreset {
        label: "MP3 (320 kbps)",
        codec: AudioCodec::Mp3,
        quality: AudioQuality::Kbps(320),
    },
    AudioPreset {
        label: "MP3 (256 kbps)",
        codec: AudioCodec::Mp3,
        quality: AudioQuality::Kbps(256),
    },
    AudioPreset {
        label: "MP3 (192 kbps)",
        codec: AudioCodec::Mp3,
        quality: AudioQuality::Kbps(192),
    },
    AudioPreset {
        label: "MP3 (128 kbps)",
        codec: AudioCodec::Mp3,
        quality: AudioQuality::Kbps(128),
    },
    AudioPreset {
        label: "M4A (AAC)",
        codec: AudioCodec::M4a,
        quality: AudioQuality::Best,
    },
    AudioPreset {
        label: "OPUS",
        codec: AudioCodec::Opus,
        quality: AudioQuality::Best,
    },
    AudioPreset {
        label: "WAV",
        codec: AudioCodec::Wav,
        quality: AudioQuality::Best,
    },
];

/// Exact-label lookup in the quality catalog
pub fn find_quality_preset(label: &str) -> Option<&'static QualityPreset> {
    QUALITY_PRESETS.iter().find(|p| p.label == label)
}

/// Exact-label lookup in the audio catalog
pub fn find_audio_preset(label: &str) -> Option<&'static AudioPreset> {
    AUDIO_PRESETS.iter().find(|p| p.label == label)
}

/// Labels for the quality pick list, in catalog order
pub fn quality_labels() -> Vec<String> {
    QUALITY_PRESETS.iter().map(|p| p.label.to_string()).collect()
}

/// Labels for the audio pick list, in catalog order
pub fn audio_labels() -> Vec<String> {
    AUDIO_PRESETS.iter().map(|p| p.label.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes() {
        assert_eq!(QUALITY_PRESETS.len(), 5);
        assert_eq!(AUDIO_PRESETS.len(), 8);
    }

    #[test]
    fn labels_are_unique() {
        let mut labels = quality_labels();
        labels.extend(audio_labels());
        let total = labels.len();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), total);
    }

    #[test]
    fn every_video_selector_has_a_fallback() {
        for preset in QUALITY_PRESETS {
            assert!(preset.selector.contains('/'), "{} lacks a fallback", preset.label);
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(find_quality_preset("720p").map(|p| p.label), Some("720p"));
        assert!(find_quality_preset("720").is_none());
        assert!(find_audio_preset("mp3 (320 kbps)").is_none());
        assert_eq!(
            find_audio_preset("MP3 (320 kbps)").map(|p| p.quality),
            Some(AudioQuality::Kbps(320))
        );
    }

    #[test]
    fn audio_quality_arguments() {
        assert_eq!(AudioQuality::Best.as_ytdlp_arg(), "0");
        assert_eq!(AudioQuality::Kbps(192).as_ytdlp_arg(), "192K");
        assert_eq!(AudioQuality::Best.to_string(), "best");
        assert_eq!(AudioQuality::Kbps(128).to_string(), "128");
    }
}
