// SPDX-License-Identifier: MPL-2.0
//! Message handling and effect execution for the application.

use super::{App, Message, Screen};
use crate::detection::DetectionReport;
use crate::sonar;
use crate::ui::{chat, dashboard, detail, landing, sonar_screen};
use iced::Task;
use std::time::Duration;

/// Delay before the chat panel produces its canned reply.
const CHAT_THINK_DELAY: Duration = Duration::from_secs(1);

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::SwitchScreen(screen) => navigate(app, screen),
        Message::Landing(msg) => match app.landing.handle(msg) {
            landing::Effect::EnterConsole => navigate(app, Screen::Dashboard),
            landing::Effect::OpenSonar => navigate(app, Screen::Sonar),
            landing::Effect::None => Task::none(),
        },
        Message::Dashboard(msg) => match app.dashboard.handle(msg) {
            dashboard::Effect::OpenFeed(id) => navigate(app, Screen::FeedDetail(id)),
            dashboard::Effect::None => Task::none(),
        },
        Message::Detail(msg) => {
            let Some(detail) = app.detail.as_mut() else {
                return Task::none();
            };
            match detail.handle(msg) {
                detail::Effect::Back => navigate(app, Screen::Dashboard),
                detail::Effect::QueueChatReply => Task::perform(
                    tokio::time::sleep(CHAT_THINK_DELAY),
                    |_| Message::Detail(detail::Message::Chat(chat::Message::ReplyReady)),
                ),
                detail::Effect::None => Task::none(),
            }
        }
        Message::Sonar(msg) => match app.sonar.handle(msg) {
            sonar_screen::Effect::Classify(readings) => {
                let endpoint = app.config.sonar_endpoint();
                Task::perform(
                    async move { sonar::classify(&endpoint, readings).await },
                    |result| Message::Sonar(sonar_screen::Message::Completed(result)),
                )
            }
            sonar_screen::Effect::Back => navigate(app, Screen::Dashboard),
            sonar_screen::Effect::None => Task::none(),
        },
    }
}

/// Switches screens. Leaving a screen tears its state down (cancelling its
/// subscriptions, decoders and recovery timers included) and entering one
/// rebuilds it freshly mounted.
fn navigate(app: &mut App, screen: Screen) -> Task<Message> {
    match screen {
        Screen::Landing => {
            app.detail = None;
            app.screen = Screen::Landing;
            Task::none()
        }
        Screen::Dashboard => {
            app.detail = None;
            app.dashboard = dashboard::State::new(&app.roster, app.retry_policy);
            app.screen = Screen::Dashboard;
            Task::none()
        }
        Screen::Sonar => {
            app.detail = None;
            app.sonar = sonar_screen::State::default();
            app.screen = Screen::Sonar;
            Task::none()
        }
        Screen::FeedDetail(id) => {
            let Some(descriptor) = app.roster.iter().find(|f| f.id == id).cloned() else {
                eprintln!("Unknown feed requested: {}", id);
                return Task::none();
            };

            let detail = detail::State::new(descriptor, app.retry_policy);
            let report_path = detail.report_path();
            app.detail = Some(detail);
            app.screen = Screen::FeedDetail(id);

            Task::perform(
                async move { DetectionReport::load(&report_path).await },
                |result| Message::Detail(detail::Message::ReportLoaded(result)),
            )
        }
    }
}
