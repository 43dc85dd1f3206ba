// SPDX-License-Identifier: MPL-2.0
//! Window/application icon loading.

use iced::window::{icon, Icon};
use resvg::usvg;

/// Edge length of the rasterized window icon.
const ICON_EDGE: u32 = 128;

/// Rasterize the embedded radar-sweep SVG into the window icon.
///
/// The SVG is embedded so packaging never has to locate assets on disk.
/// Any parse or render failure yields `None` and the platform default
/// icon is used instead.
pub fn load_window_icon() -> Option<Icon> {
    const SVG_SOURCE: &[u8] = include_bytes!("../assets/branding/sentry_console.svg");

    let tree = usvg::Tree::from_data(SVG_SOURCE, &usvg::Options::default()).ok()?;

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        ICON_EDGE as f32 / size.width(),
        ICON_EDGE as f32 / size.height(),
    );

    let mut pixmap = tiny_skia::Pixmap::new(ICON_EDGE, ICON_EDGE)?;
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    icon::from_rgba(pixmap.take(), ICON_EDGE, ICON_EDGE).ok()
}
