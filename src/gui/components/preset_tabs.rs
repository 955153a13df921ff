//! Video / Audio tabs, each with its own preset pick list

use crate::downloader::presets::{audio_labels, quality_labels};
use crate::downloader::request::DownloadMode;
use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, column, pick_list, text, Row};
use iced::{Element, Length};

/// Tab headers plus the active tab's preset list
pub fn preset_tabs(mode: DownloadMode, video_quality: &str, audio_format: &str) -> Element<'static, Message> {
    let headers = Row::with_children(
        DownloadMode::ALL
            .iter()
            .map(|tab| {
                let style = if *tab == mode {
                    theme::TabButton::Selected
                } else {
                    theme::TabButton::Unselected
                };
                button(text(tab.label()).size(15))
                    .padding([8, 20])
                    .style(iced::theme::Button::Custom(Box::new(style)))
                    .on_press(Message::ModeSelected(*tab))
                    .into()
            })
            .collect::<Vec<_>>(),
    )
    .spacing(6);

    let body = match mode {
        DownloadMode::Video => column![
            text("Select Video Quality:").size(13).style(theme::GRAY_500),
            pick_list(
                quality_labels(),
                Some(video_quality.to_string()),
                Message::VideoQualityChanged
            )
            .padding([8, 12])
            .width(Length::Fill),
        ],
        DownloadMode::Audio => column![
            text("Select Audio Format:").size(13).style(theme::GRAY_500),
            pick_list(
                audio_labels(),
                Some(audio_format.to_string()),
                Message::AudioFormatChanged
            )
            .padding([8, 12])
            .width(Length::Fill),
        ],
    }
    .spacing(6);

    column![headers, body].spacing(12).into()
}
