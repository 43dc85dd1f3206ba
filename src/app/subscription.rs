// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Each screen contributes its own subscription set; switching screens
//! therefore cancels everything the previous screen was listening to,
//! decoder streams and recovery timers included.

use super::{App, Message, Screen};
use crate::ui::{landing, sonar_screen};
use iced::{time, Subscription};
use std::time::Duration;

pub fn subscription(app: &App) -> Subscription<Message> {
    match app.screen {
        Screen::Landing => time::every(Duration::from_secs(2))
            .map(|_| Message::Landing(landing::Message::StatsTick)),
        Screen::Dashboard => app.dashboard.subscription().map(Message::Dashboard),
        Screen::FeedDetail(_) => app
            .detail
            .as_ref()
            .map(|detail| detail.subscription().map(Message::Detail))
            .unwrap_or_else(Subscription::none),
        Screen::Sonar => {
            if app.sonar.in_flight() {
                time::every(Duration::from_millis(100))
                    .map(|_| Message::Sonar(sonar_screen::Message::SpinnerTick))
            } else {
                Subscription::none()
            }
        }
    }
}
