// SPDX-License-Identifier: MPL-2.0
//! Async looping frame decoder using FFmpeg.
//!
//! One decoder per load attempt. The decode loop runs on a blocking task
//! (FFmpeg types are not `Send`) and reports everything, including open
//! failures, through the event channel, because the tile state machine is
//! the one that has to react, not a caller.

use crate::error::FeedError;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Represents a decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

/// Commands sent to the decoder task.
#[derive(Debug, Clone)]
pub enum DecoderCommand {
    /// Stop decoding and clean up resources.
    Stop,
}

/// Events sent from the decoder to the UI.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// The source opened and a video stream was found.
    Opened { width: u32, height: u32 },

    /// A new frame is ready for display. The first one means playback
    /// has started.
    FrameReady(DecodedFrame),

    /// The attempt failed. The decoder stops after sending this.
    Failed(FeedError),
}

/// Handle to a decoder task feeding one tile.
pub struct FeedDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    /// Bounded so a stalled UI applies backpressure instead of piling
    /// frames up in memory.
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl FeedDecoder {
    /// Spawns the decode loop for the given source.
    ///
    /// Never fails directly; open errors arrive as [`DecoderEvent::Failed`]
    /// so the tile lifecycle sees them like any other failure.
    #[must_use]
    pub fn spawn(source: PathBuf) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);

        tokio::task::spawn_blocking(move || {
            Self::decode_loop_blocking(source, command_rx, event_tx);
        });

        Self {
            command_tx,
            event_rx,
        }
    }

    /// Sends a command to the decoder task.
    pub fn send_command(&self, command: DecoderCommand) -> Result<(), String> {
        self.command_tx
            .send(command)
            .map_err(|_| "Decoder task is not running".to_string())
    }

    /// Receives the next event from the decoder.
    ///
    /// Returns `None` once the decoder task has terminated.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    /// Main decode loop running in a blocking thread.
    ///
    /// Decodes one frame per iteration, paces it by PTS, and seeks back to
    /// the start at end of stream so feeds loop seamlessly.
    fn decode_loop_blocking(
        source: PathBuf,
        mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        event_tx: mpsc::Sender<DecoderEvent>,
    ) {
        let fail = |event_tx: &mpsc::Sender<DecoderEvent>, error: FeedError| {
            let _ = event_tx.blocking_send(DecoderEvent::Failed(error));
        };

        if let Err(e) = super::init_ffmpeg() {
            fail(&event_tx, FeedError::LoadFailure(e.to_string()));
            return;
        }

        if !source.exists() {
            fail(
                &event_tx,
                FeedError::LoadFailure(format!("source not found: {:?}", source)),
            );
            return;
        }

        let mut ictx = match ffmpeg_next::format::input(&source) {
            Ok(ictx) => ictx,
            Err(e) => {
                fail(
                    &event_tx,
                    FeedError::LoadFailure(format!("failed to open source: {e}")),
                );
                return;
            }
        };

        let (video_stream_index, parameters, time_base) = {
            let Some(input) = ictx.streams().best(ffmpeg_next::media::Type::Video) else {
                fail(
                    &event_tx,
                    FeedError::LoadFailure("no video stream found".to_string()),
                );
                return;
            };
            (input.index(), input.parameters(), input.time_base())
        };

        // Everything past this point had data available; failures are
        // playback-start failures, not load failures.
        let context_decoder =
            match ffmpeg_next::codec::context::Context::from_parameters(parameters) {
                Ok(ctx) => ctx,
                Err(e) => {
                    fail(
                        &event_tx,
                        FeedError::PlaybackStartFailure(format!("codec context: {e}")),
                    );
                    return;
                }
            };
        let mut decoder = match context_decoder.decoder().video() {
            Ok(decoder) => decoder,
            Err(e) => {
                fail(
                    &event_tx,
                    FeedError::PlaybackStartFailure(format!("video decoder: {e}")),
                );
                return;
            }
        };

        let width = decoder.width();
        let height = decoder.height();

        let mut scaler = match ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        ) {
            Ok(scaler) => scaler,
            Err(e) => {
                fail(
                    &event_tx,
                    FeedError::PlaybackStartFailure(format!("scaler: {e}")),
                );
                return;
            }
        };

        if event_tx
            .blocking_send(DecoderEvent::Opened { width, height })
            .is_err()
        {
            return;
        }

        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let mut playback_start_time = std::time::Instant::now();
        let mut first_pts: Option<f64> = None;
        let mut any_frame_decoded = false;

        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    break;
                }
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            // Decode the next frame.
            let mut frame_decoded = false;
            for (stream, packet) in ictx.packets() {
                if stream.index() != video_stream_index {
                    continue;
                }

                // Tolerate bad packets mid-stream; the loop keeps going.
                if decoder.send_packet(&packet).is_err() {
                    continue;
                }

                let mut decoded_frame = ffmpeg_next::frame::Video::empty();
                if decoder.receive_frame(&mut decoded_frame).is_ok() {
                    let mut rgba_frame = ffmpeg_next::frame::Video::empty();
                    if scaler.run(&decoded_frame, &mut rgba_frame).is_err() {
                        continue;
                    }

                    let rgba_data = Self::extract_rgba_data(&rgba_frame);

                    let pts_secs = decoded_frame
                        .timestamp()
                        .map(|pts| pts as f64 * time_base_f64)
                        .unwrap_or(0.0);

                    // Frame pacing: wait until the frame should be displayed.
                    if first_pts.is_none() {
                        first_pts = Some(pts_secs);
                    }
                    if let Some(first) = first_pts {
                        let target_time = playback_start_time
                            + std::time::Duration::from_secs_f64((pts_secs - first).max(0.0));
                        let now = std::time::Instant::now();
                        if target_time > now {
                            std::thread::sleep(target_time - now);
                        }
                    }

                    let decoded = DecodedFrame {
                        rgba_data: Arc::new(rgba_data),
                        width,
                        height,
                        pts_secs,
                    };

                    if event_tx
                        .blocking_send(DecoderEvent::FrameReady(decoded))
                        .is_err()
                    {
                        // UI side dropped the channel.
                        return;
                    }

                    any_frame_decoded = true;
                    frame_decoded = true;
                    break;
                }
            }

            // End of stream: loop back to the start, or give up if the
            // source never produced a single frame.
            if !frame_decoded {
                if !any_frame_decoded {
                    fail(
                        &event_tx,
                        FeedError::PlaybackStartFailure(
                            "source contains no decodable frames".to_string(),
                        ),
                    );
                    return;
                }
                if let Err(e) = ictx.seek(0, ..0) {
                    fail(
                        &event_tx,
                        FeedError::PlaybackStartFailure(format!("loop seek failed: {e}")),
                    );
                    return;
                }
                decoder.flush();
                playback_start_time = std::time::Instant::now();
                first_pts = None;
            }
        }
    }

    /// Extracts RGBA data from a decoded frame, handling stride correctly.
    fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
        let width = frame.width();
        let height = frame.height();
        let data = frame.data(0);
        let stride = frame.stride(0);

        let mut rgba_bytes = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let row_start = (y * stride as u32) as usize;
            let row_end = row_start + (width * 4) as usize;
            rgba_bytes.extend_from_slice(&data[row_start..row_end]);
        }

        rgba_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn missing_source_reports_load_failure() {
        let mut decoder = FeedDecoder::spawn(PathBuf::from("/nonexistent/feed.mp4"));

        let event = tokio::time::timeout(Duration::from_secs(5), decoder.recv_event())
            .await
            .expect("decoder should report quickly");
        match event {
            Some(DecoderEvent::Failed(FeedError::LoadFailure(msg))) => {
                assert!(msg.contains("not found"));
            }
            other => panic!("expected load failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn garbage_source_fails_without_a_frame() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let path = temp_dir.path().join("feed.mp4");
        std::fs::write(&path, b"not a real mp4").expect("write");

        let mut decoder = FeedDecoder::spawn(path);
        let event = tokio::time::timeout(Duration::from_secs(5), decoder.recv_event())
            .await
            .expect("decoder should report quickly");
        assert!(
            matches!(event, Some(DecoderEvent::Failed(_))),
            "expected a failure event, got {:?}",
            event
        );
    }

    #[tokio::test]
    async fn spawn_returns_without_blocking_on_the_source() {
        // The decode loop owns all the slow work; spawning must be
        // instantaneous even for a dead source.
        let started = std::time::Instant::now();
        let decoder = FeedDecoder::spawn(PathBuf::from("/nonexistent/feed.mp4"));
        assert!(started.elapsed() < Duration::from_millis(500));

        // Stop delivery is best-effort once the loop has already exited.
        let _ = decoder.send_command(DecoderCommand::Stop);
    }

    #[test]
    fn decoded_frame_reports_dimensions() {
        let frame = DecodedFrame {
            rgba_data: Arc::new(vec![0u8; 640 * 360 * 4]),
            width: 640,
            height: 360,
            pts_secs: 0.0,
        };
        assert_eq!(frame.rgba_data.len(), 640 * 360 * 4);
    }
}
