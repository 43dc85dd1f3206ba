// SPDX-License-Identifier: MPL-2.0
//! Console UI: screens, shared widgets, styles and design tokens.

pub mod chat;
pub mod components;
pub mod dashboard;
pub mod design_tokens;
pub mod detail;
pub mod feed_tile;
pub mod landing;
pub mod sonar_screen;
pub mod styles;
pub mod theme;
pub mod widgets;
