// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Shadow, Theme, Vector};

/// Near-black root background behind every screen.
pub fn console_root(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::SURFACE_ROOT)),
        ..Default::default()
    }
}

/// Translucent glass panel used for stat boxes and side panels.
pub fn surface_panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..palette::BLACK
        })),
        border: Border {
            color: Color {
                a: opacity::BORDER_FAINT,
                ..palette::WHITE
            },
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        ..Default::default()
    }
}

/// Tile frame carrying the threat accent; `glow_alpha` drives the pulse.
pub fn tile_frame(accent: Color, glow_alpha: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(palette::SURFACE_TILE)),
        border: Border {
            color: accent,
            width: border::WIDTH_MD,
            radius: radius::SM.into(),
        },
        shadow: Shadow {
            color: Color {
                a: glow_alpha,
                ..accent
            },
            offset: Vector::ZERO,
            blur_radius: 15.0,
        },
        ..Default::default()
    }
}

/// Dark scrim behind the loading/error placeholders inside a tile.
pub fn overlay_scrim(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SCRIM,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

/// Small accent-bordered badge (threat label on a tile).
pub fn badge(accent: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color { a: 0.6, ..palette::BLACK })),
        border: Border {
            color: accent,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}

/// Presence indicator dot with its own small glow.
pub fn status_dot(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: Shadow {
            color,
            offset: Vector::ZERO,
            blur_radius: 8.0,
        },
        ..Default::default()
    }
}

/// Chat bubble; operator messages sit on the raised surface.
pub fn chat_bubble(from_operator: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(if from_operator {
            palette::SURFACE_RAISED
        } else {
            palette::SURFACE_PANEL
        })),
        border: Border {
            color: Color {
                a: opacity::BORDER_FAINT,
                ..palette::WHITE
            },
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Alert banner on the detail page; the accent comes from the alert level.
pub fn alert_banner(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::SURFACE_PANEL)),
        border: Border {
            color: Color {
                a: opacity::BORDER_FAINT,
                ..palette::WHITE
            },
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Detection-label card with a per-label accent border.
pub fn object_card(accent: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..palette::BLACK
        })),
        border: Border {
            color: Color { a: 0.25, ..accent },
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        ..Default::default()
    }
}
