#![allow(clippy::approx_constant)]

//! Custom theme definitions - light palette

use iced::widget::{button, container, progress_bar, text_input};
use iced::{Background, Border, Color, Gradient, Shadow, Theme, Vector};

// --- Palette ---

pub const BACKGROUND_START: Color = Color::from_rgb(0.941, 0.976, 1.0); // Sky Blue 50
pub const BACKGROUND_END: Color = Color::from_rgb(0.953, 0.910, 1.0); // Purple 50

pub const INDIGO_500: Color = Color::from_rgb(0.388, 0.400, 0.945);
pub const INDIGO_400: Color = Color::from_rgb(0.506, 0.549, 0.973);
pub const INDIGO_100: Color = Color::from_rgb(0.878, 0.906, 1.0);
pub const PURPLE_500: Color = Color::from_rgb(0.545, 0.361, 0.965);

pub const EMERALD_500: Color = Color::from_rgb(0.063, 0.725, 0.506);
pub const RED_500: Color = Color::from_rgb(0.937, 0.267, 0.267);

pub const GRAY_800: Color = Color::from_rgb(0.122, 0.161, 0.216); // Primary text
pub const GRAY_600: Color = Color::from_rgb(0.294, 0.333, 0.388); // Secondary text
pub const GRAY_500: Color = Color::from_rgb(0.420, 0.447, 0.502); // Labels
pub const GRAY_400: Color = Color::from_rgb(0.616, 0.639, 0.667); // Placeholder
pub const GRAY_200: Color = Color::from_rgb(0.898, 0.906, 0.922); // Borders
pub const GRAY_100: Color = Color::from_rgb(0.953, 0.957, 0.965);

pub const WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const WHITE_85: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.85);

pub const TEXT_PRIMARY: Color = GRAY_800;
pub const TEXT_SECONDARY: Color = GRAY_600;
pub const SUCCESS: Color = EMERALD_500;
pub const DANGER: Color = RED_500;

fn rounded(radius: f32) -> Border {
    Border {
        radius: radius.into(),
        ..Default::default()
    }
}

fn outlined(radius: f32, color: Color) -> Border {
    Border {
        radius: radius.into(),
        width: 2.0,
        color,
    }
}

fn accent_gradient() -> Background {
    Background::Gradient(Gradient::Linear(
        iced::gradient::Linear::new(iced::Radians(0.0))
            .add_stop(0.0, INDIGO_500)
            .add_stop(1.0, PURPLE_500),
    ))
}

// --- Containers ---

pub struct WindowBackground;

impl container::StyleSheet for WindowBackground {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Gradient(Gradient::Linear(
                iced::gradient::Linear::new(iced::Radians(2.356)) // 135 degrees
                    .add_stop(0.0, BACKGROUND_START)
                    .add_stop(1.0, BACKGROUND_END),
            ))),
            ..Default::default()
        }
    }
}

pub struct Card;

impl container::StyleSheet for Card {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(WHITE_85)),
            border: Border {
                color: GRAY_200,
                width: 1.0,
                radius: 18.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.388, 0.400, 0.945, 0.12),
                offset: Vector::new(0.0, 6.0),
                blur_radius: 18.0,
            },
        }
    }
}

// --- Buttons ---

pub struct PrimaryButton;

impl button::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(accent_gradient()),
            text_color: WHITE,
            border: rounded(12.0),
            shadow: Shadow {
                color: Color::from_rgba(0.388, 0.400, 0.945, 0.3),
                offset: Vector::new(0.0, 4.0),
                blur_radius: 12.0,
            },
            shadow_offset: Vector::new(0.0, 0.0),
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        button::Appearance {
            shadow: Shadow {
                blur_radius: 18.0,
                ..active.shadow
            },
            ..active
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(GRAY_200)),
            text_color: GRAY_500,
            shadow: Shadow::default(),
            ..self.active(style)
        }
    }
}

pub struct SecondaryButton;

impl button::StyleSheet for SecondaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(WHITE)),
            text_color: GRAY_600,
            border: Border {
                radius: 10.0.into(),
                color: GRAY_200,
                width: 1.0,
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(GRAY_100)),
            ..self.active(style)
        }
    }
}

/// Video / Audio tab headers
pub enum TabButton {
    Selected,
    Unselected,
}

impl button::StyleSheet for TabButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        match self {
            Self::Selected => button::Appearance {
                background: Some(Background::Color(INDIGO_100)),
                text_color: INDIGO_500,
                border: rounded(10.0),
                ..Default::default()
            },
            Self::Unselected => button::Appearance {
                background: None,
                text_color: GRAY_500,
                border: rounded(10.0),
                ..Default::default()
            },
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        match self {
            Self::Selected => self.active(style),
            Self::Unselected => button::Appearance {
                background: Some(Background::Color(GRAY_100)),
                text_color: GRAY_800,
                ..self.active(style)
            },
        }
    }
}

pub struct IconButton;

impl button::StyleSheet for IconButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: GRAY_600,
            border: rounded(8.0),
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            text_color: GRAY_800,
            background: Some(Background::Color(GRAY_200)),
            ..self.active(style)
        }
    }
}

// --- Inputs ---

/// Text input; `invalid` paints the border red after a validation error
pub struct Input {
    pub invalid: bool,
}

impl text_input::StyleSheet for Input {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        let border_color = if self.invalid { DANGER } else { GRAY_200 };
        text_input::Appearance {
            background: Background::Color(WHITE),
            border: outlined(12.0, border_color),
            icon_color: GRAY_500,
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        let active = self.active(style);
        if self.invalid {
            return active;
        }
        text_input::Appearance {
            border: outlined(12.0, INDIGO_400),
            ..active
        }
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        GRAY_400
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        GRAY_800
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.388, 0.400, 0.945, 0.3)
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(GRAY_100),
            ..self.active(style)
        }
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        GRAY_400
    }
}

// --- Progress bar ---

pub enum ProgressBar {
    Running,
    Completed,
    Failed,
}

impl progress_bar::StyleSheet for ProgressBar {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> progress_bar::Appearance {
        let bar = match self {
            Self::Running => accent_gradient(),
            Self::Completed => Background::Color(SUCCESS),
            Self::Failed => Background::Color(DANGER),
        };
        progress_bar::Appearance {
            background: Background::Color(INDIGO_100),
            bar,
            border_radius: 4.0.into(),
        }
    }
}
