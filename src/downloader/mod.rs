//! Download configuration and the yt-dlp collaborator

pub mod engine;
pub mod presets;
pub mod progress;
pub mod request;
pub mod traits;

pub use engine::YtDlpDownloader;
pub use presets::{AudioPreset, QualityPreset, AUDIO_PRESETS, QUALITY_PRESETS};
pub use progress::{ProgressEvent, ProgressPhase, RawProgress};
pub use request::{DownloadMode, DownloadOptions, DownloadRequest, PostProcessing};
pub use traits::{MediaDownloader, ProgressHook};
