// SPDX-License-Identifier: MPL-2.0
//! `sentry_console` is a drone-surveillance command center built with the
//! Iced GUI framework.
//!
//! It renders a grid of simulated video feeds with self-healing playback,
//! per-feed detection drill-down, a canned-reply chat panel and a sonar
//! classification form backed by an external service.

pub mod app;
pub mod config;
pub mod detection;
pub mod error;
pub mod feed;
pub mod icon;
pub mod sonar;
pub mod telemetry;
pub mod ui;
pub mod video_player;
