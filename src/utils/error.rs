//! Error handling for Tubefetch

use thiserror::Error;

/// Main error type for Tubefetch
#[derive(Debug, Error)]
pub enum TubefetchError {
    #[error("yt-dlp not found. Please install yt-dlp or set TUBEFETCH_YTDLP")]
    YtDlpNotFound,

    #[error("ffmpeg not found. Please install ffmpeg or set TUBEFETCH_FFMPEG")]
    FfmpegNotFound,

    #[error("{0}")]
    DownloadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Problems with the form, detected before any background work starts.
///
/// The `Display` text is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a video URL.")]
    MissingUrl,

    #[error("Please select a download path.")]
    MissingDestination,

    #[error("Invalid video quality selected.")]
    UnknownVideoQuality(String),

    #[error("Invalid audio format selected.")]
    UnknownAudioFormat(String),

    #[error("A download is already in progress.")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(ValidationError::MissingUrl.to_string(), "Please enter a video URL.");
        assert_eq!(
            ValidationError::UnknownAudioFormat("FLAC".into()).to_string(),
            "Invalid audio format selected."
        );
        assert_eq!(ValidationError::Busy.to_string(), "A download is already in progress.");
    }
}
