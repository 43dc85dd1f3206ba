// SPDX-License-Identifier: MPL-2.0
//! War-room dashboard: live stat rows over a 2×3 grid of feed tiles.

use crate::feed::playback::RetryPolicy;
use crate::feed::{FeedDescriptor, FeedId};
use crate::telemetry::Jitter;
use crate::ui::components::stat_box;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::feed_tile::{self, Tile};
use crate::ui::theme;
use crate::video_player::subscription::{PlaybackUpdate, RetryFired};
use iced::widget::{column, container, row, text};
use iced::{alignment, time, Element, Length, Subscription};
use std::time::Duration;

/// Spinner rotation speed in radians per animation tick.
const SPINNER_SPEED: f32 = 0.1;

/// Simulated console-wide telemetry. Jittered every two seconds inside the
/// same ranges the demo deployment uses.
#[derive(Debug, Clone)]
pub struct LiveStats {
    pub system_status: f64,
    pub active_threats: u32,
    pub network_latency: f64,
    pub detection_rate: f64,
    pub total_detections: u32,
    pub average_confidence: f64,
    pub active_alerts: u32,
}

impl Default for LiveStats {
    fn default() -> Self {
        Self {
            system_status: 92.3,
            active_threats: 4,
            network_latency: 46.8,
            detection_rate: 97.3,
            total_detections: 46,
            average_confidence: 95.8,
            active_alerts: 7,
        }
    }
}

impl LiveStats {
    fn jitter(&mut self, jitter: &mut Jitter) {
        self.system_status = jitter.in_range(90.0, 100.0);
        self.network_latency = jitter.in_range(40.0, 50.0);
        self.detection_rate = jitter.in_range(97.0, 99.0);
        self.active_threats = jitter.int_in_range(3, 6);
        self.active_alerts = jitter.int_in_range(5, 9);
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Playback(PlaybackUpdate),
    RetryFired(RetryFired),
    StatsTick,
    AnimTick,
    Open(FeedId),
}

/// Side effects the application should perform after handling a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Navigate to the detail view of this feed.
    OpenFeed(FeedId),
}

#[derive(Debug)]
pub struct State {
    tiles: Vec<Tile>,
    stats: LiveStats,
    jitter: Jitter,
    started_at: chrono::DateTime<chrono::Local>,
    uptime: String,
    pulse_phase: f32,
    spinner_rotation: f32,
}

impl State {
    /// Builds a fresh dashboard; every tile starts loading with a zeroed
    /// retry counter, exactly as if it were newly mounted.
    #[must_use]
    pub fn new(roster: &[FeedDescriptor], policy: RetryPolicy) -> Self {
        let tiles = roster
            .iter()
            .map(|descriptor| {
                let source = descriptor.source.clone();
                Tile::new(descriptor.clone(), source, policy)
            })
            .collect();

        Self {
            tiles,
            stats: LiveStats::default(),
            jitter: Jitter::seeded(),
            started_at: chrono::Local::now(),
            uptime: "0h 0m".to_string(),
            pulse_phase: 0.0,
            spinner_rotation: 0.0,
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Playback(update) => {
                if let Some(tile) = self.tiles.iter_mut().find(|t| t.descriptor.id == update.feed)
                {
                    // Restart/arm effects are realized declaratively: the
                    // subscription set is recomputed from the new state.
                    let _ = tile.handle_playback(update);
                }
                Effect::None
            }
            Message::RetryFired(fired) => {
                if let Some(tile) = self.tiles.iter_mut().find(|t| t.descriptor.id == fired.feed)
                {
                    let _ = tile.handle_retry(fired);
                }
                Effect::None
            }
            Message::StatsTick => {
                self.stats.jitter(&mut self.jitter);
                let elapsed = chrono::Local::now() - self.started_at;
                self.uptime = format!(
                    "{}h {}m",
                    elapsed.num_hours(),
                    elapsed.num_minutes() % 60
                );
                Effect::None
            }
            Message::AnimTick => {
                self.pulse_phase = (self.pulse_phase + SPINNER_SPEED) % std::f32::consts::TAU;
                self.spinner_rotation =
                    (self.spinner_rotation + SPINNER_SPEED) % std::f32::consts::TAU;
                Effect::None
            }
            Message::Open(id) => Effect::OpenFeed(id),
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> = self
            .tiles
            .iter()
            .map(|tile| tile.playback_subscription().map(Message::Playback))
            .collect();

        subscriptions.extend(
            self.tiles
                .iter()
                .map(|tile| tile.retry_subscription().map(Message::RetryFired)),
        );

        subscriptions.push(time::every(Duration::from_secs(2)).map(|_| Message::StatsTick));
        // The high-threat pulse is continuous, so the animation clock always
        // runs while the dashboard is visible.
        subscriptions.push(time::every(Duration::from_millis(100)).map(|_| Message::AnimTick));

        Subscription::batch(subscriptions)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = column![
            text("⚡ SENTRY WAR ROOM ⚡")
                .size(typography::TITLE_LG)
                .color(palette::WHITE),
            text("CLASSIFIED - TOP SECRET")
                .size(typography::CAPTION)
                .color(theme::dim_text_color()),
        ]
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill);

        let primary_stats = row![
            stat_box(
                "System Status",
                format!("{:.1}", self.stats.system_status),
                "%",
                palette::THREAT_LOW
            ),
            stat_box(
                "Active Threats",
                self.stats.active_threats.to_string(),
                "",
                palette::THREAT_HIGH
            ),
            stat_box(
                "Network Latency",
                format!("{:.1}", self.stats.network_latency),
                "ms",
                palette::INFO_500
            ),
            stat_box(
                "Detection Rate",
                format!("{:.1}", self.stats.detection_rate),
                "%",
                palette::THREAT_LOW
            ),
        ]
        .spacing(spacing::MD);

        let secondary_stats = row![
            stat_box(
                "TOTAL DETECTIONS",
                self.stats.total_detections.to_string(),
                "",
                palette::VIOLET_400
            ),
            stat_box(
                "AVG. CONFIDENCE",
                format!("{:.1}", self.stats.average_confidence),
                "%",
                palette::VIOLET_400
            ),
            stat_box("SYSTEM UPTIME", self.uptime.clone(), "", palette::VIOLET_400),
            stat_box(
                "ACTIVE ALERTS",
                self.stats.active_alerts.to_string(),
                "",
                palette::VIOLET_400
            ),
        ]
        .spacing(spacing::MD);

        let mut grid = column![].spacing(spacing::MD).height(Length::Fill);
        for chunk in self.tiles.chunks(3) {
            let mut tile_row = row![].spacing(spacing::MD).height(Length::Fill);
            for tile in chunk {
                tile_row = tile_row.push(
                    container(
                        tile.view(self.pulse_phase, self.spinner_rotation)
                            .map(|feed_tile::Event::Open(id)| Message::Open(id)),
                    )
                    .width(Length::Fill)
                    .height(Length::Fill),
                );
            }
            grid = grid.push(tile_row);
        }

        container(
            column![header, primary_stats, secondary_stats, grid].spacing(spacing::LG),
        )
        .padding(spacing::LG)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}
