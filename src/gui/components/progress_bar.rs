//! Status line with progress bar

use crate::backend::StatusBoard;
use crate::downloader::ProgressPhase;
use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{column, progress_bar as iced_progress_bar, text};
use iced::Element;

/// Render the latest status. Nothing but the hint is shown before the first download.
pub fn progress_bar(status: &StatusBoard) -> Element<'static, Message> {
    let Some(phase) = status.phase() else {
        return text("Paste a link, pick a preset and press Download.")
            .size(13)
            .style(theme::TEXT_SECONDARY)
            .into();
    };

    let (bar_style, text_color) = match phase {
        ProgressPhase::Completed => (theme::ProgressBar::Completed, theme::SUCCESS),
        ProgressPhase::Failed => (theme::ProgressBar::Failed, theme::DANGER),
        _ => (theme::ProgressBar::Running, theme::TEXT_PRIMARY),
    };

    column![
        iced_progress_bar(0.0..=1.0, status.progress())
            .height(8)
            .style(iced::theme::ProgressBar::Custom(Box::new(bar_style))),
        text(status.text().to_string()).size(14).style(text_color),
    ]
    .spacing(8)
    .into()
}
