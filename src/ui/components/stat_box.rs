// SPDX-License-Identifier: MPL-2.0
//! Bordered stat tile shared by the dashboard, detail and landing screens.

use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use crate::ui::theme;
use iced::widget::{column, container, text};
use iced::{Color, Element, Length};

/// Renders one labeled figure on a translucent panel.
pub fn stat_box<'a, Message: 'a>(
    title: &'a str,
    value: String,
    unit: &'a str,
    accent: Color,
) -> Element<'a, Message> {
    let label = text(title)
        .size(typography::CAPTION)
        .color(theme::muted_text_color());

    let figure = text(format!("{value}{unit}"))
        .size(typography::TITLE_MD)
        .color(accent);

    container(
        column![label, figure]
            .spacing(spacing::XXS)
            .width(Length::Fill),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(styles::container::surface_panel)
    .into()
}
