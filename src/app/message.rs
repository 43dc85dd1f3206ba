// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use super::Screen;
use crate::ui::{dashboard, detail, landing, sonar_screen};
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level screen messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Landing(landing::Message),
    Dashboard(dashboard::Message),
    Detail(detail::Message),
    Sonar(sonar_screen::Message),
    SwitchScreen(Screen),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional config directory override (for settings.toml).
    pub config_dir: Option<PathBuf>,
    /// Optional assets directory override (feed clips and reports).
    pub assets_dir: Option<PathBuf>,
    /// Optional roster file overriding the built-in six-feed layout.
    pub roster_path: Option<PathBuf>,
}
