// SPDX-License-Identifier: MPL-2.0
//! Shared UI color helpers for the console screens.
//!
//! The threat accent and the presence indicator are part of the tile's
//! observable contract: each is a pure function of exactly one input, so
//! playback phase can never leak into them.

use crate::detection::AlertLevel;
use crate::feed::{FeedStatus, ThreatLevel};
use crate::ui::design_tokens::{opacity, palette};
use iced::Color;

/// Accent derived from a threat level: a border/badge color and whether the
/// tile glow pulses continuously.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accent {
    pub color: Color,
    pub pulse: bool,
}

/// Threat level → accent. Only HIGH pulses.
#[must_use]
pub fn threat_accent(level: ThreatLevel) -> Accent {
    match level {
        ThreatLevel::High => Accent {
            color: palette::THREAT_HIGH,
            pulse: true,
        },
        ThreatLevel::Medium => Accent {
            color: palette::THREAT_MEDIUM,
            pulse: false,
        },
        ThreatLevel::Low => Accent {
            color: palette::THREAT_LOW,
            pulse: false,
        },
        ThreatLevel::Unknown => Accent {
            color: palette::THREAT_UNKNOWN,
            pulse: false,
        },
    }
}

/// Uplink status → presence dot color. Nothing else feeds into this.
#[must_use]
pub fn status_dot_color(status: FeedStatus) -> Color {
    match status {
        FeedStatus::Active => palette::THREAT_LOW,
        FeedStatus::Inactive => palette::THREAT_HIGH,
    }
}

/// Detection label → card color, with a fallback for unknown labels.
#[must_use]
pub fn object_color(label: &str) -> Color {
    match label.to_ascii_lowercase().as_str() {
        "person" => palette::OBJECT_PERSON,
        "truck" => palette::OBJECT_TRUCK,
        "car" => palette::OBJECT_CAR,
        "boat" => palette::OBJECT_BOAT,
        "bird" => palette::OBJECT_BIRD,
        "horse" => palette::OBJECT_HORSE,
        _ => palette::OBJECT_DEFAULT,
    }
}

/// Alert severity → banner color.
#[must_use]
pub fn alert_color(level: AlertLevel) -> Color {
    match level {
        AlertLevel::Critical => palette::ALERT_CRITICAL,
        AlertLevel::High => palette::ALERT_HIGH,
        AlertLevel::Medium => palette::ALERT_MEDIUM,
        AlertLevel::Low => palette::ALERT_LOW,
    }
}

/// Glow strength for a pulsing accent at animation phase `t` (radians).
/// Oscillates between 0.5 and 0.8, the resting glow being 0.5.
#[must_use]
pub fn pulse_alpha(t: f32) -> f32 {
    0.65 + 0.15 * t.sin()
}

/// Resting glow strength for non-pulsing accents.
pub const GLOW_RESTING_ALPHA: f32 = 0.5;

/// Muted white used for secondary copy.
#[must_use]
pub fn muted_text_color() -> Color {
    Color {
        a: opacity::TEXT_MUTED,
        ..palette::WHITE
    }
}

/// Dim white used for tertiary copy and timestamps.
#[must_use]
pub fn dim_text_color() -> Color {
    Color {
        a: opacity::TEXT_DIM,
        ..palette::WHITE
    }
}

/// Standard color for error text.
#[must_use]
pub fn error_text_color() -> Color {
    palette::THREAT_HIGH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threat_accent_mapping_is_deterministic() {
        for level in [
            ThreatLevel::Low,
            ThreatLevel::Medium,
            ThreatLevel::High,
            ThreatLevel::Unknown,
        ] {
            assert_eq!(threat_accent(level), threat_accent(level));
        }
    }

    #[test]
    fn only_high_threat_pulses() {
        assert!(threat_accent(ThreatLevel::High).pulse);
        assert!(!threat_accent(ThreatLevel::Medium).pulse);
        assert!(!threat_accent(ThreatLevel::Low).pulse);
        assert!(!threat_accent(ThreatLevel::Unknown).pulse);
    }

    #[test]
    fn threat_colors_follow_severity() {
        assert_eq!(threat_accent(ThreatLevel::High).color, palette::THREAT_HIGH);
        assert_eq!(
            threat_accent(ThreatLevel::Medium).color,
            palette::THREAT_MEDIUM
        );
        assert_eq!(threat_accent(ThreatLevel::Low).color, palette::THREAT_LOW);
        assert_eq!(
            threat_accent(ThreatLevel::Unknown).color,
            palette::THREAT_UNKNOWN
        );
    }

    #[test]
    fn presence_dot_depends_only_on_status() {
        assert_eq!(status_dot_color(FeedStatus::Active), palette::THREAT_LOW);
        assert_eq!(status_dot_color(FeedStatus::Inactive), palette::THREAT_HIGH);
    }

    #[test]
    fn unknown_object_labels_get_the_fallback_color() {
        assert_eq!(object_color("submarine"), palette::OBJECT_DEFAULT);
        assert_eq!(object_color("PERSON"), palette::OBJECT_PERSON);
    }

    #[test]
    fn pulse_alpha_stays_within_glow_band() {
        let mut t = 0.0_f32;
        while t < std::f32::consts::TAU {
            let alpha = pulse_alpha(t);
            assert!((0.5..=0.8).contains(&alpha), "alpha {} out of band", alpha);
            t += 0.05;
        }
    }
}
