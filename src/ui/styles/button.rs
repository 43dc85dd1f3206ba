// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{border, opacity, palette, radius};
use iced::widget::button;
use iced::{Background, Border, Color, Shadow, Theme, Vector};

/// Primary action button (send, analyze, enter).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::INDIGO_700,
        button::Status::Disabled => Color {
            a: 0.4,
            ..palette::INDIGO_600
        },
        _ => palette::INDIGO_600,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: palette::WHITE,
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: Shadow {
            color: Color {
                a: 0.3,
                ..palette::INDIGO_600
            },
            offset: Vector { x: 0.0, y: 2.0 },
            blur_radius: 8.0,
        },
        ..button::Style::default()
    }
}

/// Quiet bordered button (navigation, add/remove rows).
pub fn ghost(_theme: &Theme, status: button::Status) -> button::Style {
    let border_alpha = match status {
        button::Status::Hovered => 0.3,
        _ => opacity::BORDER_FAINT,
    };

    button::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        text_color: Color {
            a: opacity::TEXT_MUTED,
            ..palette::WHITE
        },
        border: Border {
            color: Color {
                a: border_alpha,
                ..palette::WHITE
            },
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        ..button::Style::default()
    }
}
