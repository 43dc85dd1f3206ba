// SPDX-License-Identifier: MPL-2.0
//! Feed detail screen: processed clip, detection report and the chat panel.

use crate::detection::DetectionReport;
use crate::error::Error;
use crate::feed::playback::RetryPolicy;
use crate::feed::FeedDescriptor;
use crate::telemetry::Jitter;
use crate::ui::chat;
use crate::ui::components::stat_box;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::feed_tile::Tile;
use crate::ui::styles;
use crate::ui::theme;
use crate::video_player::subscription::{PlaybackUpdate, RetryFired};
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{alignment, time, Element, Length, Subscription};
use std::path::PathBuf;
use std::time::Duration;

const SPINNER_SPEED: f32 = 0.1;

#[derive(Debug, Clone)]
pub enum Message {
    Playback(PlaybackUpdate),
    RetryFired(RetryFired),
    ReportLoaded(Result<DetectionReport, Error>),
    StatsTick,
    AnimTick,
    Chat(chat::Message),
    Back,
}

/// Side effects the application should perform after handling a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Return to the dashboard.
    Back,
    /// Schedule the chat think delay, then deliver `Chat(ReplyReady)`.
    QueueChatReply,
}

#[derive(Debug)]
pub struct State {
    tile: Tile,
    report: Option<DetectionReport>,
    load_error: Option<String>,
    chat: chat::State,
    confidence: f64,
    clock: String,
    jitter: Jitter,
    spinner_rotation: f32,
}

impl State {
    /// Builds the detail view for one feed; playback starts over the
    /// processed clip, and the report is expected to be loaded by the
    /// caller via [`DetectionReport::load`].
    #[must_use]
    pub fn new(descriptor: FeedDescriptor, policy: RetryPolicy) -> Self {
        let source = descriptor.detail_source.clone();
        Self {
            tile: Tile::new(descriptor, source, policy),
            report: None,
            load_error: None,
            chat: chat::State::default(),
            confidence: 95.8,
            clock: chrono::Local::now().format("%H:%M:%S").to_string(),
            jitter: Jitter::seeded(),
            spinner_rotation: 0.0,
        }
    }

    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.tile.descriptor.report_path.clone()
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Playback(update) => {
                let _ = self.tile.handle_playback(update);
                Effect::None
            }
            Message::RetryFired(fired) => {
                let _ = self.tile.handle_retry(fired);
                Effect::None
            }
            Message::ReportLoaded(Ok(report)) => {
                self.report = Some(report);
                self.load_error = None;
                Effect::None
            }
            Message::ReportLoaded(Err(err)) => {
                eprintln!("Failed to load detection report: {}", err);
                self.load_error = Some("Failed to load detection data".to_string());
                Effect::None
            }
            Message::StatsTick => {
                self.confidence = self.jitter.in_range(94.0, 98.0);
                self.clock = chrono::Local::now().format("%H:%M:%S").to_string();
                Effect::None
            }
            Message::AnimTick => {
                self.spinner_rotation =
                    (self.spinner_rotation + SPINNER_SPEED) % std::f32::consts::TAU;
                Effect::None
            }
            Message::Chat(chat_msg) => match self.chat.handle(chat_msg, self.report.as_ref()) {
                chat::Effect::QueueReply => Effect::QueueChatReply,
                chat::Effect::None => Effect::None,
            },
            Message::Back => Effect::Back,
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            self.tile.playback_subscription().map(Message::Playback),
            self.tile.retry_subscription().map(Message::RetryFired),
            time::every(Duration::from_secs(1)).map(|_| Message::StatsTick),
            time::every(Duration::from_millis(100)).map(|_| Message::AnimTick),
        ])
    }

    pub fn view(&self) -> Element<'_, Message> {
        let descriptor = &self.tile.descriptor;

        let back = button(text("< WAR ROOM").size(typography::BODY))
            .on_press(Message::Back)
            .style(styles::button::ghost)
            .padding([spacing::XXS, spacing::SM]);

        let header = row![
            back,
            container(
                text(format!("⚡ DRONE FEED {} ⚡", descriptor.id))
                    .size(typography::TITLE_LG)
                    .color(palette::WHITE)
            )
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
            // Balance the back button so the title stays centered.
            Space::new().width(Length::Fixed(110.0)).height(Length::Shrink),
        ]
        .align_y(alignment::Vertical::Center);

        let mut left = column![self.video_pane()].spacing(spacing::LG);

        if let Some(report) = &self.report {
            left = left.push(alert_banner(report));
        }
        left = left.push(self.stat_row());
        if let Some(report) = &self.report {
            left = left.push(objects_section(report));
            left = left.push(video_info_section(report));
        }
        if let Some(error) = &self.load_error {
            left = left.push(
                text(error)
                    .size(typography::BODY)
                    .color(theme::error_text_color()),
            );
        }

        let chat_panel = container(self.chat.view().map(Message::Chat))
            .style(styles::container::surface_panel)
            .width(Length::FillPortion(chat::PANEL_PORTION))
            .height(Length::Fill);

        let body = row![
            scrollable(left.padding(iced::Padding {
                right: spacing::MD,
                ..iced::Padding::ZERO
            }))
            .width(Length::FillPortion(100 - chat::PANEL_PORTION))
            .height(Length::Fill),
            chat_panel,
        ]
        .spacing(spacing::LG)
        .height(Length::Fill);

        container(column![header, body].spacing(spacing::LG))
            .padding(spacing::LG)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn video_pane(&self) -> Element<'_, Message> {
        container(self.tile.detail_view(self.spinner_rotation))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::DETAIL_VIDEO_HEIGHT))
            .style(styles::container::surface_panel)
            .into()
    }

    fn stat_row(&self) -> Element<'_, Message> {
        let total = self
            .report
            .as_ref()
            .map(|r| r.total_objects())
            .unwrap_or_default();
        let fps = self
            .report
            .as_ref()
            .and_then(DetectionReport::fps)
            .unwrap_or_default();

        row![
            stat_box(
                "Total Detections",
                total.to_string(),
                "",
                palette::ALERT_CRITICAL
            ),
            stat_box("FPS", format!("{:.0}", fps), "", palette::ALERT_MEDIUM),
            stat_box(
                "Confidence",
                format!("{:.1}", self.confidence),
                "%",
                palette::ALERT_LOW
            ),
            stat_box("Uptime", self.clock.clone(), "", palette::OBJECT_BIRD),
        ]
        .spacing(spacing::MD)
        .into()
    }
}

fn alert_banner(report: &DetectionReport) -> Element<'_, Message> {
    let level = report.alert_level();
    let color = theme::alert_color(level);

    container(
        row![
            text("⚠").size(typography::TITLE_LG).color(color),
            column![
                text(format!("{} ALERT LEVEL", level.label()))
                    .size(typography::TITLE_SM)
                    .color(color),
                text(format!("{} objects detected", report.total_objects()))
                    .size(typography::BODY)
                    .color(theme::muted_text_color()),
            ]
            .spacing(spacing::XXS),
        ]
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(styles::container::alert_banner)
    .into()
}

fn objects_section(report: &DetectionReport) -> Element<'_, Message> {
    let heading = text("Detected Objects")
        .size(typography::TITLE_SM)
        .color(palette::WHITE);

    let cards: Vec<Element<'_, Message>> = report
        .unique_objects
        .iter()
        .map(|(label, count)| {
            let color = theme::object_color(label);
            container(
                column![
                    text(count.to_string()).size(typography::TITLE_LG).color(color),
                    text(label.clone())
                        .size(typography::BODY)
                        .color(theme::muted_text_color()),
                ]
                .spacing(spacing::XXS)
                .align_x(alignment::Horizontal::Center)
                .width(Length::Fill),
            )
            .padding(spacing::MD)
            .width(Length::Fill)
            .style(styles::container::object_card(color))
            .into()
        })
        .collect();

    column![heading, grid(cards, 4)].spacing(spacing::MD).into()
}

fn video_info_section(report: &DetectionReport) -> Element<'_, Message> {
    let heading = text("Video Information")
        .size(typography::TITLE_SM)
        .color(palette::WHITE);

    let cards: Vec<Element<'_, Message>> = report
        .video_info_rows()
        .into_iter()
        .map(|(key, value)| {
            container(
                column![
                    text(value).size(typography::TITLE_MD).color(palette::WHITE),
                    text(key)
                        .size(typography::CAPTION)
                        .color(theme::dim_text_color()),
                ]
                .spacing(spacing::XXS)
                .align_x(alignment::Horizontal::Center)
                .width(Length::Fill),
            )
            .padding(spacing::MD)
            .width(Length::Fill)
            .style(styles::container::object_card(palette::OBJECT_DEFAULT))
            .into()
        })
        .collect();

    column![heading, grid(cards, 4)].spacing(spacing::MD).into()
}

/// Lays elements out in rows of `per_row`, left-aligned.
fn grid(elements: Vec<Element<'_, Message>>, per_row: usize) -> Element<'_, Message> {
    let mut rows = column![].spacing(spacing::MD);
    let mut elements = elements.into_iter().peekable();
    while elements.peek().is_some() {
        let mut current = row![].spacing(spacing::MD);
        for _ in 0..per_row {
            match elements.next() {
                Some(element) => current = current.push(element),
                None => current = current.push(Space::new().width(Length::Fill).height(Length::Shrink)),
            }
        }
        rows = rows.push(current);
    }
    rows.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::builtin_roster;
    use std::path::Path;

    fn descriptor() -> FeedDescriptor {
        builtin_roster(Path::new("assets")).remove(3)
    }

    fn report() -> DetectionReport {
        serde_json::from_str(
            r#"{"video_info": {"fps": 24}, "unique_objects": {"person": 40, "car": 20}}"#,
        )
        .expect("report parses")
    }

    #[test]
    fn detail_plays_the_processed_clip() {
        let state = State::new(descriptor(), RetryPolicy::default());
        assert!(state
            .tile
            .playback
            .source()
            .to_string_lossy()
            .contains("processed_output"));
    }

    #[test]
    fn report_load_failure_keeps_the_page_usable() {
        let mut state = State::new(descriptor(), RetryPolicy::default());
        let effect = state.handle(Message::ReportLoaded(Err(Error::Io("gone".into()))));
        assert_eq!(effect, Effect::None);
        assert_eq!(
            state.load_error.as_deref(),
            Some("Failed to load detection data")
        );
        let _ = state.view();
    }

    #[test]
    fn chat_send_bubbles_up_as_queue_effect() {
        let mut state = State::new(descriptor(), RetryPolicy::default());
        state.handle(Message::ReportLoaded(Ok(report())));
        state.handle(Message::Chat(chat::Message::InputChanged("report".into())));
        let effect = state.handle(Message::Chat(chat::Message::Send));
        assert_eq!(effect, Effect::QueueChatReply);
    }

    #[test]
    fn stats_tick_jitters_confidence_in_range() {
        let mut state = State::new(descriptor(), RetryPolicy::default());
        for _ in 0..50 {
            state.handle(Message::StatsTick);
            assert!((94.0..98.0).contains(&state.confidence));
        }
    }

    #[test]
    fn back_message_produces_back_effect() {
        let mut state = State::new(descriptor(), RetryPolicy::default());
        assert_eq!(state.handle(Message::Back), Effect::Back);
    }

    #[test]
    fn loaded_report_renders_sections() {
        let mut state = State::new(descriptor(), RetryPolicy::default());
        state.handle(Message::ReportLoaded(Ok(report())));
        assert!(state.report.is_some());
        let _ = state.view();
    }
}
