//! Main view implementation

use crate::backend::StatusBoard;
use crate::downloader::DownloadMode;
use crate::gui::app::Message;
use crate::gui::components::{path_input, preset_tabs, progress_bar, url_input};
use crate::gui::theme;
use crate::utils::ValidationError;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Element, Length};

/// Everything the main view renders
pub struct MainViewState<'a> {
    pub url: &'a str,
    pub destination: &'a str,
    pub mode: DownloadMode,
    pub video_quality: &'a str,
    pub audio_format: &'a str,
    pub status: &'a StatusBoard,
    pub busy: bool,
    pub field_error: Option<&'a ValidationError>,
    pub can_open_folder: bool,
}

/// Create the main view
pub fn main_view(state: MainViewState<'_>) -> Element<'static, Message> {
    let url_invalid = matches!(state.field_error, Some(ValidationError::MissingUrl));
    let path_invalid = matches!(state.field_error, Some(ValidationError::MissingDestination));

    let form = container(
        column![
            text("Download Video")
                .size(26)
                .style(iced::theme::Text::Color(theme::TEXT_PRIMARY)),
            url_input(state.url, url_invalid),
            preset_tabs(state.mode, state.video_quality, state.audio_format),
            path_input(state.destination, path_invalid),
            row![
                button(text("Open folder").size(14))
                    .on_press_maybe(state.can_open_folder.then_some(Message::OpenDestination))
                    .padding([12, 18])
                    .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
                Space::with_width(Length::Fill),
                button(text(if state.busy { "Downloading..." } else { "Download" }).size(16))
                    .on_press_maybe((!state.busy).then_some(Message::DownloadButtonPressed))
                    .padding([12, 32])
                    .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
            ],
        ]
        .spacing(18),
    )
    .padding(24)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(theme::Card)));

    let status = container(progress_bar(state.status))
        .padding(20)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(theme::Card)));

    column![form, status]
        .spacing(20)
        .padding(24)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
