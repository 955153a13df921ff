//! Main GUI application

use crate::backend::{DownloadController, DownloadForm, Notification, StatusBoard};
use crate::downloader::{DownloadMode, ProgressEvent, YtDlpDownloader};
use crate::gui::views::{main_view, MainViewState};
use crate::gui::{clipboard, notify, theme};
use crate::utils::{AppSettings, Toolchain, ValidationError};
use iced::widget::container;
use iced::{Application, Command, Element, Length, Subscription, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Startup state handed over from `main`
pub struct AppFlags {
    pub settings: AppSettings,
    pub toolchain: Toolchain,
    /// Long-lived runtime the background downloads run on
    pub runtime: Arc<Runtime>,
}

/// Main application state
pub struct TubefetchApp {
    controller: DownloadController,
    runtime: Arc<Runtime>,
    settings: AppSettings,

    // Form
    url_input: String,
    destination: String,
    mode: DownloadMode,
    video_quality: String,
    audio_format: String,
    field_error: Option<ValidationError>,

    // Download
    status: StatusBoard,
    events: Option<mpsc::UnboundedReceiver<ProgressEvent>>,
    last_destination: Option<PathBuf>,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Input events
    UrlInputChanged(String),
    PasteFromClipboard,
    ClearUrlInput,
    DestinationChanged(String),
    BrowseDestination,

    // Presets
    ModeSelected(DownloadMode),
    VideoQualityChanged(String),
    AudioFormatChanged(String),

    // Actions
    DownloadButtonPressed,
    OpenDestination,

    // System
    Tick, // Drains progress events from the background download
}

impl Application for TubefetchApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = AppFlags;

    fn new(flags: AppFlags) -> (Self, Command<Message>) {
        let downloader = Arc::new(YtDlpDownloader::from_toolchain(&flags.toolchain));
        let settings = flags.settings;

        let app = Self {
            controller: DownloadController::new(downloader),
            runtime: flags.runtime,
            url_input: String::new(),
            destination: settings.download_location.to_string_lossy().to_string(),
            mode: DownloadMode::Video,
            video_quality: settings.video_quality.clone(),
            audio_format: settings.audio_format.clone(),
            field_error: None,
            status: StatusBoard::new(),
            events: None,
            last_destination: None,
            settings,
        };

        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Tubefetch - Video Downloader")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::UrlInputChanged(url) => {
                self.url_input = url;
                self.clear_field_error(ValidationError::MissingUrl);
            }

            Message::PasteFromClipboard => match clipboard::get_clipboard_content() {
                Ok(content) => {
                    self.url_input = content;
                    self.clear_field_error(ValidationError::MissingUrl);
                }
                Err(e) => warn!("{}", e),
            },

            Message::ClearUrlInput => self.url_input.clear(),

            Message::DestinationChanged(path) => {
                self.destination = path;
                self.clear_field_error(ValidationError::MissingDestination);
            }

            Message::BrowseDestination => {
                let mut dialog = rfd::FileDialog::new().set_title("Choose download folder");
                let current = PathBuf::from(self.destination.trim());
                if current.is_dir() {
                    dialog = dialog.set_directory(&current);
                }
                if let Some(path) = dialog.pick_folder() {
                    self.destination = path.to_string_lossy().to_string();
                    self.clear_field_error(ValidationError::MissingDestination);
                }
            }

            Message::ModeSelected(mode) => self.mode = mode,

            Message::VideoQualityChanged(label) => self.video_quality = label,

            Message::AudioFormatChanged(label) => self.audio_format = label,

            Message::DownloadButtonPressed => self.start_download(),

            Message::OpenDestination => {
                let folder = self
                    .last_destination
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(self.destination.trim()));
                if let Err(e) = open::that(&folder) {
                    warn!("Failed to open {:?}: {}", folder, e);
                }
            }

            Message::Tick => self.drain_events(),
        }

        Command::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let content = main_view(MainViewState {
            url: &self.url_input,
            destination: &self.destination,
            mode: self.mode,
            video_quality: &self.video_quality,
            audio_format: &self.audio_format,
            status: &self.status,
            busy: self.controller.is_busy() || self.events.is_some(),
            field_error: self.field_error.as_ref(),
            can_open_folder: !self.destination.trim().is_empty(),
        });

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(theme::WindowBackground)))
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.events.is_some() {
            iced::time::every(Duration::from_millis(100)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn theme(&self) -> Self::Theme {
        Theme::Light
    }
}

impl TubefetchApp {
    fn form(&self) -> DownloadForm {
        DownloadForm {
            url: self.url_input.clone(),
            destination: self.destination.clone(),
            mode: self.mode,
            video_quality: self.video_quality.clone(),
            audio_format: self.audio_format.clone(),
        }
    }

    fn start_download(&mut self) {
        if let Err(e) = self.dispatch() {
            warn!("Download not started: {}", e);
            notify::show(&Notification::from(&e));
            self.field_error = Some(e);
        }
    }

    /// Start a download unless the previous one is still running or its final
    /// events have not been shown yet.
    fn dispatch(&mut self) -> Result<(), ValidationError> {
        if self.events.is_some() {
            return Err(ValidationError::Busy);
        }

        let active = self.controller.start(&self.form(), self.runtime.handle())?;
        info!(
            "Dispatched download {} via {}",
            active.request.id,
            self.controller.downloader_id()
        );
        self.field_error = None;
        self.last_destination = Some(active.request.destination.clone());
        self.events = Some(active.events);
        self.remember(active.request.destination);
        Ok(())
    }

    /// Apply queued progress; the only place the status text is written
    fn drain_events(&mut self) {
        let Some(events) = self.events.as_mut() else {
            return;
        };

        let drained = self.status.drain(events);
        if drained.finished {
            self.events = None;
        }
        for notification in &drained.notifications {
            notify::show(notification);
        }
    }

    fn clear_field_error(&mut self, error: ValidationError) {
        if self.field_error.as_ref() == Some(&error) {
            self.field_error = None;
        }
    }

    /// Persist the destination and presets of the last dispatched download
    fn remember(&mut self, destination: PathBuf) {
        self.settings.download_location = destination;
        self.settings.video_quality = self.video_quality.clone();
        self.settings.audio_format = self.audio_format.clone();
        if let Err(e) = self.settings.save() {
            warn!("Failed to save settings: {}", e);
        }
    }
}
