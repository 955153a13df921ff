//! URL input component

use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, column, row, text, text_input, tooltip};
use iced::{Alignment, Element, Length};

/// URL field with paste and clear buttons
pub fn url_input(value: &str, invalid: bool) -> Element<'static, Message> {
    let input_row = row![
        text_input("Paste video URL here...", value)
            .on_input(Message::UrlInputChanged)
            .on_submit(Message::DownloadButtonPressed)
            .padding(12)
            .width(Length::Fill)
            .style(iced::theme::TextInput::Custom(Box::new(theme::Input { invalid }))),
        tooltip(
            button(text("Paste").size(14))
                .on_press(Message::PasteFromClipboard)
                .padding([8, 12])
                .style(iced::theme::Button::Custom(Box::new(theme::IconButton))),
            "Paste from clipboard",
            tooltip::Position::Bottom,
        ),
        button(text("Clear").size(14))
            .on_press(Message::ClearUrlInput)
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(theme::IconButton))),
    ]
    .spacing(8)
    .align_items(Alignment::Center);

    column![
        text("Video URL").size(13).style(theme::GRAY_500),
        input_row
    ]
    .spacing(6)
    .into()
}
