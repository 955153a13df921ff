//! Destination folder input

use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, column, row, text, text_input};
use iced::{Alignment, Element, Length};

/// Destination field with a folder picker
pub fn path_input(value: &str, invalid: bool) -> Element<'static, Message> {
    column![
        text("Download Path").size(13).style(theme::GRAY_500),
        row![
            text_input("Choose a folder...", value)
                .on_input(Message::DestinationChanged)
                .padding(12)
                .width(Length::Fill)
                .style(iced::theme::TextInput::Custom(Box::new(theme::Input { invalid }))),
            button(text("Browse").size(14))
                .on_press(Message::BrowseDestination)
                .padding([10, 16])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
        ]
        .spacing(8)
        .align_items(Alignment::Center),
    ]
    .spacing(6)
    .into()
}
