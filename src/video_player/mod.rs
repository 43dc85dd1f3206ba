// SPDX-License-Identifier: MPL-2.0
//! Video playback engine for the console feeds.
//!
//! Feeds are muted, looping and autoplaying, so the engine is deliberately
//! small: an FFmpeg decode loop on a blocking task, RGBA frames delivered
//! through an Iced subscription, and a `Stop` command. No audio, no seeking,
//! no frame cache.

mod decoder;
pub mod subscription;

pub use decoder::{DecodedFrame, DecoderCommand, DecoderEvent, FeedDecoder};
pub use subscription::{feed_playback, PlaybackUpdate};

use crate::error::Result;
use std::sync::Once;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with appropriate log level.
///
/// Safe to call multiple times; initialization happens once. The log level
/// is lowered to ERROR so per-frame container warnings do not flood the
/// console alongside our own diagnostics.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(crate::error::Error::Io(format!(
                "FFmpeg initialization failed: {e}"
            )));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}
