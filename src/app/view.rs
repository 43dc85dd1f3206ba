// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{App, Message, Screen};
use crate::ui::styles;
use iced::widget::{container, text, Container};
use iced::{Element, Length};

/// Renders the current application view based on the active screen.
pub fn view(app: &App) -> Element<'_, Message> {
    let current: Element<'_, Message> = match app.screen {
        Screen::Landing => app.landing.view().map(Message::Landing),
        Screen::Dashboard => app.dashboard.view().map(Message::Dashboard),
        Screen::FeedDetail(_) => match &app.detail {
            Some(detail) => detail.view().map(Message::Detail),
            None => container(text("Feed unavailable")).center(Length::Fill).into(),
        },
        Screen::Sonar => app.sonar.view().map(Message::Sonar),
    };

    Container::new(current)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::console_root)
        .into()
}
