// SPDX-License-Identifier: MPL-2.0
//! Marketing landing screen.
//!
//! Static product copy plus three slowly wobbling teaser stats. Operator
//! sign-in is delegated to the deployment's identity provider, so the only
//! interaction here is entering the console.

use crate::telemetry::Jitter;
use crate::ui::components::stat_box;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use crate::ui::theme;
use iced::widget::{button, column, container, row, text};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone)]
pub enum Message {
    StatsTick,
    EnterConsole,
    OpenSonar,
}

/// Side effects the application should perform after handling a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    EnterConsole,
    OpenSonar,
}

#[derive(Debug)]
pub struct State {
    active_threats: u32,
    detection_rate: u32,
    network_latency: u32,
    jitter: Jitter,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self {
            active_threats: 0,
            detection_rate: 0,
            network_latency: 0,
            jitter: Jitter::seeded(),
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::StatsTick => {
                self.active_threats = self.jitter.int_in_range(0, 4);
                self.detection_rate = self.jitter.int_in_range(95, 99);
                self.network_latency = self.jitter.int_in_range(15, 24);
                Effect::None
            }
            Message::EnterConsole => Effect::EnterConsole,
            Message::OpenSonar => Effect::OpenSonar,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let hero = column![
            text("SENTRY AI")
                .size(typography::TITLE_LG * 1.6)
                .color(palette::WHITE),
            text("Autonomous aerial threat detection, around the clock")
                .size(typography::TITLE_SM)
                .color(theme::muted_text_color()),
        ]
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center);

        let features = row![
            feature_card(
                "Autonomous Detection",
                "Neural detection models classify aerial contacts in real time \
                 across every feed, with no operator in the loop.",
            ),
            feature_card(
                "Live Surveillance Grid",
                "Six simultaneous drone feeds stream into the war room with \
                 per-sector threat classification and instant drill-down.",
            ),
            feature_card(
                "Threat Analytics",
                "Detection histories roll up into alert levels, confidence \
                 trends and per-object counts for after-action review.",
            ),
        ]
        .spacing(spacing::MD);

        let teasers = row![
            stat_box(
                "ACTIVE THREATS",
                self.active_threats.to_string(),
                "",
                palette::THREAT_HIGH
            ),
            stat_box(
                "DETECTION RATE",
                self.detection_rate.to_string(),
                "%",
                palette::THREAT_LOW
            ),
            stat_box(
                "NETWORK LATENCY",
                self.network_latency.to_string(),
                "ms",
                palette::INFO_500
            ),
        ]
        .spacing(spacing::MD);

        let actions = row![
            button(text("ENTER WAR ROOM").size(typography::BODY))
                .on_press(Message::EnterConsole)
                .style(styles::button::primary)
                .padding([spacing::SM, spacing::XL]),
            button(text("SONAR CONSOLE").size(typography::BODY))
                .on_press(Message::OpenSonar)
                .style(styles::button::ghost)
                .padding([spacing::SM, spacing::XL]),
        ]
        .spacing(spacing::MD);

        let access_note = text("Operator access is provisioned by your identity provider.")
            .size(typography::CAPTION)
            .color(theme::dim_text_color());

        container(
            column![hero, features, teasers, actions, access_note]
                .spacing(spacing::XL)
                .align_x(alignment::Horizontal::Center)
                .max_width(980.0),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

fn feature_card<'a>(title: &'a str, body: &'a str) -> Element<'a, Message> {
    container(
        column![
            text(title).size(typography::TITLE_SM).color(palette::WHITE),
            text(body)
                .size(typography::BODY)
                .color(theme::muted_text_color()),
        ]
        .spacing(spacing::SM),
    )
    .padding(spacing::LG)
    .width(Length::Fill)
    .style(styles::container::surface_panel)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teaser_stats_start_at_zero_until_first_tick() {
        let state = State::new();
        assert_eq!(state.active_threats, 0);
        assert_eq!(state.detection_rate, 0);
    }

    #[test]
    fn stats_tick_keeps_teasers_in_marketing_ranges() {
        let mut state = State::new();
        for _ in 0..50 {
            state.handle(Message::StatsTick);
            assert!(state.active_threats <= 4);
            assert!((95..=99).contains(&state.detection_rate));
            assert!((15..=24).contains(&state.network_latency));
        }
    }

    #[test]
    fn enter_button_emits_navigation_effect() {
        let mut state = State::new();
        assert_eq!(state.handle(Message::EnterConsole), Effect::EnterConsole);
        assert_eq!(state.handle(Message::OpenSonar), Effect::OpenSonar);
    }
}
