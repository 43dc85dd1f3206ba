// SPDX-License-Identifier: MPL-2.0
//! One video tile: a feed descriptor, its playback lifecycle and its view.
//!
//! The tile owns its state machine and frame buffer exclusively; screens
//! route decoder and timer deliveries here and execute the returned effects.

use crate::feed::playback::{self, RetryPolicy};
use crate::feed::{FeedDescriptor, FeedId};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theme;
use crate::ui::widgets::AnimatedSpinner;
use crate::video_player::subscription::{feed_playback, recovery_timer, PlaybackUpdate, RetryFired};
use crate::video_player::DecoderEvent;
use iced::widget::{column, container, image, mouse_area, row, stack, text, Space};
use iced::{alignment, Color, ContentFit, Element, Length, Subscription};
use std::path::PathBuf;

/// Interaction emitted by a tile view.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Navigation intent toward the feed's detail view. Fires regardless
    /// of playback phase.
    Open(FeedId),
}

/// One tile instance. Created fresh whenever its screen is (re)entered,
/// which is what resets the retry counter.
#[derive(Debug)]
pub struct Tile {
    pub descriptor: FeedDescriptor,
    pub playback: playback::State,
    frame: Option<image::Handle>,
}

impl Tile {
    /// Builds a tile playing `source` (dashboard clip or processed clip).
    #[must_use]
    pub fn new(descriptor: FeedDescriptor, source: PathBuf, policy: RetryPolicy) -> Self {
        Self {
            descriptor,
            playback: playback::State::new(source, policy),
            frame: None,
        }
    }

    /// Routes a decoder delivery into the machine. Deliveries from a
    /// superseded attempt are dropped before they can touch the frame
    /// buffer.
    pub fn handle_playback(&mut self, update: PlaybackUpdate) -> playback::Effect {
        if update.attempt != self.playback.attempt() {
            return playback::Effect::None;
        }
        match update.event {
            DecoderEvent::Opened { .. } => playback::Effect::None,
            DecoderEvent::FrameReady(frame) => {
                self.frame = Some(image::Handle::from_rgba(
                    frame.width,
                    frame.height,
                    frame.rgba_data.as_ref().clone(),
                ));
                self.playback.handle(playback::Message::PlaybackStarted {
                    attempt: update.attempt,
                })
            }
            DecoderEvent::Failed(error) => self.playback.handle(playback::Message::PlaybackFailed {
                attempt: update.attempt,
                error,
            }),
        }
    }

    /// Routes a recovery-timer firing into the machine.
    pub fn handle_retry(&mut self, fired: RetryFired) -> playback::Effect {
        self.playback.handle(playback::Message::RetryElapsed {
            attempt: fired.attempt,
        })
    }

    /// Decoder subscription for the current attempt. The subscription id is
    /// derived from the attempt key, so every recovery or source change
    /// provably spawns a fresh decoder.
    pub fn playback_subscription(&self) -> Subscription<PlaybackUpdate> {
        feed_playback(
            self.descriptor.id,
            self.playback.attempt(),
            self.playback.source().clone(),
        )
    }

    /// One-shot recovery timer, present exactly while a retry is armed.
    pub fn retry_subscription(&self) -> Subscription<RetryFired> {
        match self.playback.pending_retry() {
            Some(attempt) => recovery_timer(
                self.descriptor.id,
                attempt,
                self.playback.retry_delay(),
            ),
            None => Subscription::none(),
        }
    }

    /// Renders the tile. `pulse_phase` drives the high-threat glow,
    /// `spinner_rotation` the loading spinner.
    pub fn view(&self, pulse_phase: f32, spinner_rotation: f32) -> Element<'_, Event> {
        let accent = theme::threat_accent(self.descriptor.threat_level);
        let glow_alpha = if accent.pulse {
            theme::pulse_alpha(pulse_phase)
        } else {
            theme::GLOW_RESTING_ALPHA
        };

        // The media slot is always present; visibility is opacity-driven so
        // recovery does not flash an unmount.
        let media: Element<'_, Event> = match &self.frame {
            Some(handle) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .opacity(self.playback.media_opacity())
                .into(),
            None => Space::new().width(Length::Fill).height(Length::Fill).into(),
        };

        let mut layers = stack![media, self.title_bar(accent.color), self.stats_bar()];

        match self.playback.phase() {
            playback::Phase::Loading => {
                layers = layers.push(placeholder_overlay(
                    "INITIALIZING FEED...",
                    palette::THREAT_LOW,
                    Some(spinner_rotation),
                ));
            }
            playback::Phase::Errored => {
                layers = layers.push(placeholder_overlay(
                    "FEED ERROR - RECONNECTING...",
                    palette::THREAT_HIGH,
                    None,
                ));
            }
            playback::Phase::Ready => {}
        }

        layers = layers.push(self.presence_dot());

        let framed = container(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::tile_frame(accent.color, glow_alpha));

        mouse_area(framed)
            .on_press(Event::Open(self.descriptor.id))
            .interaction(iced::mouse::Interaction::Pointer)
            .into()
    }

    /// Renders just the media surface with its lifecycle placeholders, for
    /// the detail page. Produces no interactions, so the message type is
    /// the caller's.
    pub fn detail_view<Message: 'static>(&self, spinner_rotation: f32) -> Element<'_, Message> {
        let media: Element<'_, Message> = match &self.frame {
            Some(handle) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Contain)
                .opacity(self.playback.media_opacity())
                .into(),
            None => Space::new().width(Length::Fill).height(Length::Fill).into(),
        };

        let mut layers = stack![media];
        match self.playback.phase() {
            playback::Phase::Loading => {
                layers = layers.push(placeholder_overlay(
                    "INITIALIZING FEED...",
                    palette::THREAT_LOW,
                    Some(spinner_rotation),
                ));
            }
            playback::Phase::Errored => {
                layers = layers.push(placeholder_overlay(
                    "FEED ERROR - RECONNECTING...",
                    palette::THREAT_HIGH,
                    None,
                ));
            }
            playback::Phase::Ready => {}
        }

        layers.into()
    }

    fn title_bar(&self, accent: Color) -> Element<'_, Event> {
        let location = text(&self.descriptor.location)
            .size(typography::BODY)
            .color(palette::WHITE);

        let badge = container(
            text(self.descriptor.threat_level.label())
                .size(typography::CAPTION)
                .color(accent),
        )
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::badge(accent));

        container(
            row![location, Space::new().width(Length::Fill).height(Length::Shrink), badge]
                .align_y(alignment::Vertical::Center),
        )
        .padding([spacing::XS, spacing::SM])
        .width(Length::Fill)
        .align_y(alignment::Vertical::Top)
        .into()
    }

    fn stats_bar(&self) -> Element<'_, Event> {
        let detections = text(format!("DETECTIONS: {}", self.descriptor.detections))
            .size(typography::CAPTION)
            .color(theme::muted_text_color());
        let confidence = text(format!("CONF: {}%", self.descriptor.confidence))
            .size(typography::CAPTION)
            .color(theme::muted_text_color());

        container(row![detections, Space::new().width(Length::Fill).height(Length::Shrink), confidence])
            .padding([spacing::XS, spacing::SM])
            .width(Length::Fill)
            .height(Length::Fill)
            .align_y(alignment::Vertical::Bottom)
            .into()
    }

    fn presence_dot(&self) -> Element<'_, Event> {
        let dot = container(Space::new()
            .width(Length::Fixed(sizing::STATUS_DOT))
            .height(Length::Fixed(sizing::STATUS_DOT)))
        .style(styles::container::status_dot(theme::status_dot_color(
            self.descriptor.status,
        )));

        container(dot)
            .width(Length::Fill)
            .padding(spacing::XS)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Top)
            .into()
    }
}

/// Scrimmed lifecycle placeholder centered over the media slot.
fn placeholder_overlay<Message: 'static>(
    message: &'static str,
    color: Color,
    spinner_rotation: Option<f32>,
) -> Element<'static, Message> {
    let caption = text(message).size(typography::BODY).color(color);

    let content: Element<'static, Message> = match spinner_rotation {
        Some(rotation) => column![
            AnimatedSpinner::new(color, rotation).into_element(),
            caption
        ]
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .into(),
        None => caption.into(),
    };

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::overlay_scrim)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;
    use crate::feed::playback::{AttemptKey, Effect, Phase};
    use crate::feed::{builtin_roster, FeedStatus, ThreatLevel};
    use std::path::Path;
    use std::sync::Arc;

    fn tile() -> Tile {
        let descriptor = builtin_roster(Path::new("assets")).remove(0);
        let source = descriptor.source.clone();
        Tile::new(descriptor, source, RetryPolicy::default())
    }

    fn frame_update(tile: &Tile) -> PlaybackUpdate {
        PlaybackUpdate {
            feed: tile.descriptor.id,
            attempt: tile.playback.attempt(),
            event: DecoderEvent::FrameReady(crate::video_player::DecodedFrame {
                rgba_data: Arc::new(vec![0u8; 16]),
                width: 2,
                height: 2,
                pts_secs: 0.0,
            }),
        }
    }

    #[test]
    fn first_frame_moves_tile_to_ready() {
        let mut tile = tile();
        let effect = tile.handle_playback(frame_update(&tile));
        assert_eq!(effect, Effect::None);
        assert_eq!(tile.playback.phase(), Phase::Ready);
        assert!(tile.frame.is_some());
    }

    #[test]
    fn stale_attempt_frames_never_touch_the_buffer() {
        let mut tile = tile();
        let stale = PlaybackUpdate {
            attempt: AttemptKey {
                source_serial: 0,
                retry: 5,
            },
            ..frame_update(&tile)
        };
        let effect = tile.handle_playback(stale);
        assert_eq!(effect, Effect::None);
        assert!(tile.frame.is_none());
        assert_eq!(tile.playback.phase(), Phase::Loading);
    }

    #[test]
    fn failure_then_timer_firing_bumps_attempt() {
        let mut tile = tile();
        let attempt = tile.playback.attempt();
        tile.handle_playback(PlaybackUpdate {
            feed: tile.descriptor.id,
            attempt,
            event: DecoderEvent::Failed(FeedError::LoadFailure("gone".into())),
        });
        assert_eq!(tile.playback.phase(), Phase::Errored);
        assert_eq!(tile.playback.pending_retry(), Some(attempt));

        let effect = tile.handle_retry(RetryFired {
            feed: tile.descriptor.id,
            attempt,
        });
        assert!(matches!(effect, Effect::RestartLoad { .. }));
        assert_eq!(tile.playback.retry_count(), 1);
    }

    #[test]
    fn tile_view_renders_in_every_phase() {
        let mut tile = tile();
        let _ = tile.view(0.0, 0.0);

        tile.handle_playback(frame_update(&tile));
        let _ = tile.view(1.0, 0.5);

        tile.handle_playback(PlaybackUpdate {
            feed: tile.descriptor.id,
            attempt: tile.playback.attempt(),
            event: DecoderEvent::Failed(FeedError::LoadFailure("gone".into())),
        });
        let _ = tile.view(2.0, 1.0);
    }

    #[test]
    fn descriptor_styling_inputs_are_independent_of_phase() {
        let tile = tile();
        assert_eq!(tile.descriptor.threat_level, ThreatLevel::High);
        assert_eq!(tile.descriptor.status, FeedStatus::Active);
        // Accent and dot derive from descriptor fields alone; phase is not
        // an input to either helper.
        let accent = theme::threat_accent(tile.descriptor.threat_level);
        let dot = theme::status_dot_color(tile.descriptor.status);
        assert!(accent.pulse);
        assert_eq!(dot, palette::THREAT_LOW);
    }
}
