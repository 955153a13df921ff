use crate::downloader::progress::RawProgress;
use crate::downloader::request::DownloadOptions;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Callback the downloader invokes with every progress report.
///
/// It is called from the downloader's own execution context, never from the UI thread.
pub type ProgressHook = Arc<dyn Fn(RawProgress) + Send + Sync>;

/// The external media downloader
///
/// This trait isolates the application from how media is actually fetched and
/// post-processed (yt-dlp child process in production, stubs in tests).
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    /// Returns a unique identifier for this downloader (e.g., "yt-dlp")
    fn id(&self) -> &'static str;

    /// Fetch `url` according to `options`, reporting progress through `hook`.
    ///
    /// Any network, extraction, post-processing or disk failure is returned as an error
    /// with a human-readable description.
    async fn download(&self, url: &str, options: &DownloadOptions, hook: ProgressHook) -> Result<()>;
}
