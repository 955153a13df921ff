//! Tubefetch library

pub mod backend;
pub mod downloader;
pub mod gui;
pub mod utils;

// Re-export main types for easier use
pub use backend::{DownloadController, DownloadForm, Notification, StatusBoard};
pub use downloader::{DownloadMode, DownloadRequest, MediaDownloader, ProgressEvent, YtDlpDownloader};
pub use gui::{Message, TubefetchApp};
pub use utils::{AppSettings, Toolchain, TubefetchError, ValidationError};
