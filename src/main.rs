//! Tubefetch - Video Downloader
//!
//! A small desktop front end for yt-dlp: paste a URL, pick a video quality or an
//! audio format, and download into a folder.

use anyhow::Result;
use clap::Parser;
use iced::Application;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinError;
use tubefetch::backend::{
    DownloadController, DownloadForm, Notification, NotificationLevel, StatusBoard,
};
use tubefetch::downloader::{DownloadMode, YtDlpDownloader, AUDIO_PRESETS, QUALITY_PRESETS};
use tubefetch::gui::{self, notify};
use tubefetch::utils::{AppSettings, Toolchain};

#[derive(Parser)]
#[command(version, about = "Download videos or audio through yt-dlp")]
struct Args {
    /// Download this URL without opening the window
    #[arg(long)]
    url: Option<String>,

    /// Video quality label (default: last used)
    #[arg(long, conflicts_with = "audio")]
    quality: Option<String>,

    /// Extract audio with this format label instead of downloading video
    #[arg(long)]
    audio: Option<String>,

    /// Destination folder (default: last used)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the available presets and exit
    #[arg(long)]
    list_presets: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    if args.list_presets {
        print_presets();
        return Ok(());
    }

    let settings = AppSettings::load();
    let headless = args.url.is_some();

    let toolchain = match Toolchain::discover(&settings) {
        Ok(toolchain) => toolchain,
        Err(e) => {
            tracing::error!("{}", e);
            if !headless {
                notify::show(&Notification::error(e.to_string()));
            }
            return Err(e.into());
        }
    };
    tracing::info!(
        "Using yt-dlp at {:?}, ffmpeg at {:?}",
        toolchain.ytdlp,
        toolchain.ffmpeg
    );

    let runtime = Arc::new(tokio::runtime::Runtime::new()?);

    if let Some(url) = args.url {
        let form = DownloadForm {
            url,
            destination: args
                .output
                .unwrap_or_else(|| settings.download_location.clone())
                .to_string_lossy()
                .to_string(),
            mode: if args.audio.is_some() {
                DownloadMode::Audio
            } else {
                DownloadMode::Video
            },
            video_quality: args.quality.unwrap_or_else(|| settings.video_quality.clone()),
            audio_format: args.audio.unwrap_or_else(|| settings.audio_format.clone()),
        };
        return runtime.block_on(download_cli(form, toolchain));
    }

    gui::TubefetchApp::run(iced::Settings {
        window: iced::window::Settings {
            size: iced::Size::new(640.0, 600.0),
            resizable: false,
            ..Default::default()
        },
        antialiasing: true,
        ..iced::Settings::with_flags(gui::AppFlags {
            settings,
            toolchain,
            runtime,
        })
    })?;

    Ok(())
}

fn print_presets() {
    println!("Video quality:");
    for preset in QUALITY_PRESETS {
        println!("  {:<28} {}", preset.label, preset.selector);
    }
    println!("Audio format:");
    for preset in AUDIO_PRESETS {
        println!("  {:<28} {} @ {}", preset.label, preset.codec, preset.quality);
    }
}

/// Run one download through the same controller and status logic the window uses
async fn download_cli(form: DownloadForm, toolchain: Toolchain) -> Result<()> {
    let controller = DownloadController::new(Arc::new(YtDlpDownloader::from_toolchain(&toolchain)));
    let mut active = controller.start(&form, &tokio::runtime::Handle::current())?;
    println!("Downloading {} into {:?}", active.request.url, active.request.destination);

    let mut board = StatusBoard::new();
    let mut outcome = None;
    while let Some(event) = active.events.recv().await {
        let notification = board.apply(&event);
        println!("{}", board.text());
        if let Some(notification) = notification {
            println!("{}: {}", notification.title, notification.message);
            outcome = Some(notification);
        }
        if event.is_terminal() {
            break;
        }
    }
    let joined = active.handle.await;
    cli_outcome(outcome, joined)
}

/// Exit result for a headless download. A task that died without a final event
/// reports why it died.
fn cli_outcome(outcome: Option<Notification>, joined: Result<(), JoinError>) -> Result<()> {
    if let Err(e) = &joined {
        tracing::error!("Download task ended abnormally: {}", e);
    }

    match (outcome, joined) {
        (Some(n), _) if n.level == NotificationLevel::Info => Ok(()),
        (Some(n), _) => Err(anyhow::anyhow!(n.message)),
        (None, Err(e)) => Err(anyhow::anyhow!("the download task stopped unexpectedly: {}", e)),
        (None, Ok(())) => Err(anyhow::anyhow!("the download task stopped unexpectedly")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn panicked_task_is_reported() {
        let joined = tokio::spawn(async { panic!("boom") }).await;

        let err = cli_outcome(None, joined).unwrap_err();
        assert!(err.to_string().contains("panicked"), "{}", err);
    }

    #[tokio::test]
    async fn final_notification_decides_the_exit() {
        let ok = tokio::spawn(async {}).await;
        assert!(cli_outcome(Some(Notification::success("done")), ok).is_ok());

        let ok = tokio::spawn(async {}).await;
        let err = cli_outcome(Some(Notification::error("An error occurred: disk full")), ok).unwrap_err();
        assert_eq!(err.to_string(), "An error occurred: disk full");
    }
}
