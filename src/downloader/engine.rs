//! yt-dlp child-process downloader
//!
//! The configuration bag is translated into yt-dlp command-line flags. Progress is
//! requested through `--progress-template` so every hook invocation becomes one
//! machine-readable stdout line, which is parsed and handed to the progress hook.

use crate::downloader::progress::{parse_progress_line, PROGRESS_TEMPLATE};
use crate::downloader::request::{DownloadOptions, PostProcessing};
use crate::downloader::traits::{MediaDownloader, ProgressHook};
use crate::utils::error::TubefetchError;
use crate::utils::toolchain::Toolchain;
use anyhow::Result;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

/// Downloader backed by the yt-dlp executable
#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    ytdlp_path: PathBuf,
    ffmpeg_location: Option<PathBuf>,
}

impl YtDlpDownloader {
    pub fn new(ytdlp_path: PathBuf, ffmpeg_location: Option<PathBuf>) -> Self {
        Self {
            ytdlp_path,
            ffmpeg_location,
        }
    }

    pub fn from_toolchain(toolchain: &Toolchain) -> Self {
        Self::new(toolchain.ytdlp.clone(), Some(toolchain.ffmpeg.clone()))
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &PathBuf {
        &self.ytdlp_path
    }

    /// Command-line arguments for one download
    pub fn build_args(&self, url: &str, options: &DownloadOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            options.format.clone().into(),
            "-o".into(),
            options.output_template.clone().into(),
        ];

        if options.quiet {
            args.push("--quiet".into());
        }
        if options.no_warnings {
            args.push("--no-warnings".into());
        }

        // Progress stays on even in quiet mode; one line per hook call
        args.extend([
            "--progress".into(),
            "--newline".into(),
            "--no-colors".into(),
            "--progress-template".into(),
            PROGRESS_TEMPLATE.into(),
        ]);

        if let Some(ffmpeg) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".into());
            args.push(ffmpeg.clone().into_os_string());
        }

        let extract_audio = options.extract_audio
            || options
                .post_processors
                .iter()
                .any(|pp| matches!(pp, PostProcessing::ExtractAudio { .. }));
        if extract_audio {
            args.push("--extract-audio".into());
        }

        for pp in &options.post_processors {
            match pp {
                PostProcessing::ExtractAudio { codec, quality } => {
                    args.push("--audio-format".into());
                    args.push(codec.as_str().into());
                    args.push("--audio-quality".into());
                    args.push(quality.as_ytdlp_arg().into());
                }
                PostProcessing::ReencodeAudio {
                    codec,
                    bitrate_kbps,
                } => {
                    args.push("--postprocessor-args".into());
                    args.push(format!("ffmpeg:-c:a {} -b:a {}k", codec, bitrate_kbps).into());
                }
            }
        }

        if let Some(container) = &options.merge_output_format {
            args.push("--merge-output-format".into());
            args.push(container.clone().into());
        }

        args.push("--".into());
        args.push(url.into());
        args
    }
}

#[async_trait]
impl MediaDownloader for YtDlpDownloader {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    async fn download(&self, url: &str, options: &DownloadOptions, hook: ProgressHook) -> Result<()> {
        let args = self.build_args(url, options);
        debug!("Running {:?} with {:?}", self.ytdlp_path, args);

        // kill_on_drop: the child is torn down on every exit path, including an early
        // return from this function or the task being dropped.
        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| TubefetchError::DownloadError(format!("Failed to start yt-dlp: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TubefetchError::DownloadError("yt-dlp stdout unavailable".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| TubefetchError::DownloadError("yt-dlp stderr unavailable".into()))?;

        // Keep the most relevant stderr line for the failure message. The pipe is
        // drained to EOF so yt-dlp never blocks or dies writing to it.
        let stderr_reader = tokio::spawn(async move {
            let mut reader = BufReader::new(stderr);
            let mut buf = Vec::new();
            let mut last_error: Option<String> = None;
            let mut last_line: Option<String> = None;
            loop {
                let line = match read_lossy_line(&mut reader, &mut buf).await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Stopped reading yt-dlp stderr: {}", e);
                        break;
                    }
                };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed.starts_with("ERROR:") {
                    last_error = Some(trimmed.to_string());
                }
                last_line = Some(trimmed.to_string());
            }
            last_error.or(last_line)
        });

        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();
        while let Some(line) = read_lossy_line(&mut reader, &mut buf).await? {
            if let Some(raw) = parse_progress_line(&line) {
                hook(raw);
            }
        }

        let status = child.wait().await?;
        let stderr_tail = stderr_reader.await.unwrap_or(None);

        if status.success() {
            info!("yt-dlp finished for {}", url);
            Ok(())
        } else {
            let message = stderr_tail.unwrap_or_else(|| format!("yt-dlp exited with {}", status));
            error!("yt-dlp failed for {}: {}", url, message);
            Err(TubefetchError::DownloadError(message).into())
        }
    }
}

/// Read one line, decoding invalid UTF-8 lossily. yt-dlp writes in the locale's
/// code page on some platforms.
async fn read_lossy_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf[..]);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::presets::{find_audio_preset, find_quality_preset};
    use crate::downloader::request::DownloadRequest;

    fn args_as_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    fn window(args: &[String], flag: &str) -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    }

    #[test]
    fn video_args() {
        let downloader = YtDlpDownloader::new("yt-dlp".into(), Some("/opt/ffmpeg/bin".into()));
        let request = DownloadRequest::video(
            "https://example.com/watch?v=1",
            "/tmp/videos",
            find_quality_preset("720p").unwrap(),
        );
        let args = args_as_strings(downloader.build_args(&request.url, &request.options()));

        assert_eq!(
            window(&args, "-f").as_deref(),
            Some("bestvideo[height<=720]+bestaudio/best[height<=720]")
        );
        assert_eq!(window(&args, "-o").as_deref(), Some("/tmp/videos/%(title)s.%(ext)s"));
        assert_eq!(window(&args, "--merge-output-format").as_deref(), Some("mp4"));
        assert_eq!(
            window(&args, "--postprocessor-args").as_deref(),
            Some("ffmpeg:-c:a aac -b:a 192k")
        );
        assert_eq!(window(&args, "--ffmpeg-location").as_deref(), Some("/opt/ffmpeg/bin"));
        assert!(args.contains(&"--quiet".to_string()));
        assert!(args.contains(&"--no-warnings".to_string()));
        assert!(!args.contains(&"--extract-audio".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("https://example.com/watch?v=1"));
    }

    #[test]
    fn audio_args() {
        let downloader = YtDlpDownloader::new("yt-dlp".into(), None);
        let request = DownloadRequest::audio(
            "https://example.com/watch?v=1",
            "/tmp/music",
            find_audio_preset("MP3 (256 kbps)").unwrap(),
        );
        let args = args_as_strings(downloader.build_args(&request.url, &request.options()));

        assert_eq!(window(&args, "-f").as_deref(), Some("bestaudio/best"));
        assert!(args.contains(&"--extract-audio".to_string()));
        assert_eq!(window(&args, "--audio-format").as_deref(), Some("mp3"));
        assert_eq!(window(&args, "--audio-quality").as_deref(), Some("256K"));
        assert!(window(&args, "--merge-output-format").is_none());
        assert!(window(&args, "--ffmpeg-location").is_none());
    }

    #[test]
    fn url_cannot_be_mistaken_for_a_flag() {
        let downloader = YtDlpDownloader::new("yt-dlp".into(), None);
        let request = DownloadRequest::video("--exec=rm", "/tmp", find_quality_preset("360p").unwrap());
        let args = args_as_strings(downloader.build_args(&request.url, &request.options()));

        let n = args.len();
        assert_eq!(args[n - 2], "--");
        assert_eq!(args[n - 1], "--exec=rm");
    }

    #[tokio::test]
    async fn undecodable_bytes_do_not_end_the_stream() {
        let mut reader: &[u8] = b"WARNING: caf\xe9\r\ntubefetch|finished|100%|NA\nlast";
        let mut buf = Vec::new();

        let first = read_lossy_line(&mut reader, &mut buf).await.unwrap();
        assert_eq!(first.as_deref(), Some("WARNING: caf\u{FFFD}"));

        let second = read_lossy_line(&mut reader, &mut buf).await.unwrap().unwrap();
        assert!(parse_progress_line(&second).is_some());

        let third = read_lossy_line(&mut reader, &mut buf).await.unwrap();
        assert_eq!(third.as_deref(), Some("last"));
        assert_eq!(read_lossy_line(&mut reader, &mut buf).await.unwrap(), None);
    }
}
