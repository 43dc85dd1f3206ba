// SPDX-License-Identifier: MPL-2.0
//! Iced subscription for feed playback events.
//!
//! Each load attempt gets its own subscription, identified by the feed id
//! plus the attempt key. Bumping the attempt key therefore tears the old
//! decoder down and spawns a fresh one: the subscription identity is the
//! re-entry key of the tile lifecycle.

use super::decoder::{DecoderEvent, FeedDecoder};
use crate::feed::playback::AttemptKey;
use crate::feed::FeedId;
use iced::futures::SinkExt;
use iced::stream;
use std::path::PathBuf;
use std::time::Duration;

/// Subscription identity for one load attempt of one feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FeedPlaybackId {
    feed: FeedId,
    attempt: AttemptKey,
}

/// A decoder event, tagged with the tile and attempt it belongs to so the
/// update loop can discard deliveries from superseded attempts.
#[derive(Debug, Clone)]
pub struct PlaybackUpdate {
    pub feed: FeedId,
    pub attempt: AttemptKey,
    pub event: DecoderEvent,
}

/// Creates a playback subscription for one attempt.
///
/// The stream idles forever after a failure instead of completing:
/// a completed stream would be respawned by the runtime while its id is
/// still requested, which would amount to an uncontrolled retry loop
/// bypassing the recovery timer.
pub fn feed_playback(
    feed: FeedId,
    attempt: AttemptKey,
    source: PathBuf,
) -> iced::Subscription<PlaybackUpdate> {
    iced::Subscription::run_with_id(
        FeedPlaybackId { feed, attempt },
        stream::channel(16, move |mut output| async move {
            let mut decoder = FeedDecoder::spawn(source);

            while let Some(event) = decoder.recv_event().await {
                let failed = matches!(event, DecoderEvent::Failed(_));
                if output
                    .send(PlaybackUpdate {
                        feed,
                        attempt,
                        event,
                    })
                    .await
                    .is_err()
                {
                    break;
                }
                if failed {
                    break;
                }
            }

            // Dropping the handle closes the command channel; the decode
            // loop exits on its own.
            drop(decoder);
            iced::futures::future::pending::<()>().await
        }),
    )
}

/// Subscription identity for one recovery episode of one feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RecoveryTimerId {
    feed: FeedId,
    attempt: AttemptKey,
}

/// The single-shot recovery timer elapsed for this attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryFired {
    pub feed: FeedId,
    pub attempt: AttemptKey,
}

/// One-shot recovery timer for an errored attempt.
///
/// The timer exists exactly as long as the tile keeps the attempt armed:
/// when the machine clears its pending retry (recovery, source change or
/// teardown), the id leaves the subscription set and the runtime drops the
/// sleep, which cancels it deterministically. After firing, the stream idles so
/// the runtime cannot respawn it while the id is still requested.
pub fn recovery_timer(
    feed: FeedId,
    attempt: AttemptKey,
    delay: Duration,
) -> iced::Subscription<RetryFired> {
    iced::Subscription::run_with_id(
        RecoveryTimerId { feed, attempt },
        stream::channel(1, move |mut output| async move {
            tokio::time::sleep(delay).await;
            let _ = output.send(RetryFired { feed, attempt }).await;
            iced::futures::future::pending::<()>().await
        }),
    )
}
