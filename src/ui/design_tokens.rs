// SPDX-License-Identifier: MPL-2.0
//! Design tokens for the console UI.
//!
//! The console is permanently dark; every surface sits on near-black with
//! glow accents, so the palette is organized around the threat colors and
//! the detection label colors rather than a light/dark pair.

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;

    // Console surfaces, darkest to lightest.
    pub const SURFACE_ROOT: Color = Color::from_rgb(0.039, 0.039, 0.039);
    pub const SURFACE_PANEL: Color = Color::from_rgb(0.067, 0.067, 0.067);
    pub const SURFACE_TILE: Color = Color::from_rgb(0.102, 0.102, 0.102);
    pub const SURFACE_RAISED: Color = Color::from_rgb(0.118, 0.118, 0.118);

    // Threat accents.
    pub const THREAT_HIGH: Color = Color::from_rgb(0.937, 0.267, 0.267);
    pub const THREAT_MEDIUM: Color = Color::from_rgb(0.961, 0.620, 0.043);
    pub const THREAT_LOW: Color = Color::from_rgb(0.063, 0.725, 0.506);
    pub const THREAT_UNKNOWN: Color = Color::from_rgb(0.420, 0.447, 0.502);

    // Alert banner scale (detail page).
    pub const ALERT_CRITICAL: Color = Color::from_rgb(1.0, 0.231, 0.231);
    pub const ALERT_HIGH: Color = Color::from_rgb(1.0, 0.584, 0.0);
    pub const ALERT_MEDIUM: Color = Color::from_rgb(1.0, 0.839, 0.039);
    pub const ALERT_LOW: Color = Color::from_rgb(0.196, 0.843, 0.294);

    // Detection label colors.
    pub const OBJECT_PERSON: Color = Color::from_rgb(1.0, 0.231, 0.231);
    pub const OBJECT_TRUCK: Color = Color::from_rgb(1.0, 0.584, 0.0);
    pub const OBJECT_CAR: Color = Color::from_rgb(1.0, 0.839, 0.039);
    pub const OBJECT_BOAT: Color = Color::from_rgb(0.196, 0.843, 0.294);
    pub const OBJECT_BIRD: Color = Color::from_rgb(0.039, 0.518, 1.0);
    pub const OBJECT_HORSE: Color = Color::from_rgb(0.749, 0.353, 0.949);
    pub const OBJECT_DEFAULT: Color = Color::from_rgb(0.392, 0.824, 1.0);

    // Semantic colors.
    pub const INFO_500: Color = Color::from_rgb(0.231, 0.510, 0.965);
    pub const VIOLET_400: Color = Color::from_rgb(0.655, 0.545, 0.980);
    pub const INDIGO_600: Color = Color::from_rgb(0.310, 0.275, 0.898);
    pub const INDIGO_700: Color = Color::from_rgb(0.263, 0.220, 0.792);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    /// Hairline borders on dark surfaces.
    pub const BORDER_FAINT: f32 = 0.1;
    pub const TEXT_DIM: f32 = 0.5;
    pub const TEXT_MUTED: f32 = 0.7;
    /// Translucent panels over the root background.
    pub const SURFACE: f32 = 0.4;
    /// Scrim behind loading/error placeholders.
    pub const SCRIM: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const ICON_SM: f32 = 16.0;
    pub const ICON_XL: f32 = 48.0;

    /// Presence indicator dot.
    pub const STATUS_DOT: f32 = 8.0;

    /// Minimum tile height in the dashboard grid.
    pub const TILE_MIN_HEIGHT: f32 = 250.0;

    /// Detail page video pane height.
    pub const DETAIL_VIDEO_HEIGHT: f32 = 500.0;

    /// Chat panel share of the detail page, as a portion of 100.
    pub const CHAT_PANEL_PORTION: u16 = 35;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Screen headings ("SENTRY WAR ROOM").
    pub const TITLE_LG: f32 = 30.0;

    /// Panel headings, stat values.
    pub const TITLE_MD: f32 = 20.0;

    /// Section headers.
    pub const TITLE_SM: f32 = 18.0;

    /// Most UI text.
    pub const BODY: f32 = 14.0;

    /// Badges, timestamps, overlay captions.
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    /// Tile frames carry the threat accent at this width.
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0;
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::SCRIM > opacity::SURFACE);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::BODY > typography::CAPTION);

    assert!(border::WIDTH_MD > border::WIDTH_SM);

    assert!(palette::THREAT_HIGH.r >= 0.0 && palette::THREAT_HIGH.r <= 1.0);
};
