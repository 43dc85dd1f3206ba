// SPDX-License-Identifier: MPL-2.0
//! Per-tile playback lifecycle state machine.
//!
//! One `State` instance is owned by exactly one tile. Transitions are driven
//! by injected events only (engine callbacks, the recovery timer, source
//! changes), so the machine is testable without a real decoder or clock.
//!
//! Every load attempt carries an [`AttemptKey`]. The decoder subscription and
//! the recovery timer are both keyed on it, so a bumped key provably creates
//! a fresh engine instance and any event from a superseded attempt is
//! rejected by comparison rather than by timing.

use crate::error::FeedError;
use std::path::PathBuf;
use std::time::Duration;

/// Delay between entering the errored phase and the reconnect attempt.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(3000);

/// Lifecycle phase of a tile. Exactly one value at all times; there is no
/// representable `loading && error` combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Errored,
}

/// Identity of one load attempt: which source generation, which retry.
///
/// Incrementing either component forces the media engine to treat the next
/// load as a brand-new instance instead of a no-op on an element it
/// considers unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptKey {
    /// Bumped whenever the source locator changes.
    pub source_serial: u64,
    /// Recovery attempts since the tile was created. Never displayed.
    pub retry: u32,
}

/// Reconnection policy. The default reproduces the original deployment:
/// fixed 3-second delay, no ceiling, no backoff growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    /// `None` retries forever.
    pub max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: DEFAULT_RETRY_DELAY,
            max_retries: None,
        }
    }
}

/// Events consumed by the machine.
#[derive(Debug, Clone)]
pub enum Message {
    /// The engine delivered its first frame for this attempt.
    PlaybackStarted { attempt: AttemptKey },
    /// The engine failed before or after start; both failure kinds collapse
    /// into the errored phase.
    PlaybackFailed {
        attempt: AttemptKey,
        error: FeedError,
    },
    /// The single-shot recovery timer for this attempt elapsed.
    RetryElapsed { attempt: AttemptKey },
    /// The page shell swapped the source locator.
    SourceChanged { source: PathBuf },
}

/// Side effects the host should perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Tear down any engine for a previous attempt and start loading the
    /// attempt named here.
    RestartLoad { attempt: AttemptKey },
    /// Arm the single-shot recovery timer for the attempt named here.
    ArmRetry {
        attempt: AttemptKey,
        delay: Duration,
    },
    /// Retry ceiling reached; stay errored without re-arming.
    GaveUp,
}

/// Playback state owned exclusively by one tile instance.
#[derive(Debug, Clone)]
pub struct State {
    source: PathBuf,
    source_serial: u64,
    phase: Phase,
    retry_count: u32,
    /// The armed recovery timer, if any. At most one is outstanding; a
    /// firing whose key no longer matches is stale and ignored.
    pending_retry: Option<AttemptKey>,
    policy: RetryPolicy,
}

impl State {
    /// Creates a tile in the loading phase for the given source.
    #[must_use]
    pub fn new(source: PathBuf, policy: RetryPolicy) -> Self {
        Self {
            source,
            source_serial: 0,
            phase: Phase::Loading,
            retry_count: 0,
            pending_retry: None,
            policy,
        }
    }

    /// Applies one event and returns the effect the host must execute.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::PlaybackStarted { attempt } => {
                if attempt != self.attempt() {
                    return Effect::None;
                }
                if self.phase == Phase::Loading {
                    self.phase = Phase::Ready;
                }
                Effect::None
            }
            Message::PlaybackFailed { attempt, error } => {
                if attempt != self.attempt() {
                    return Effect::None;
                }
                if self.phase == Phase::Errored {
                    // Already recovering; at most one timer per episode.
                    return Effect::None;
                }
                eprintln!(
                    "Feed error ({}) on {:?}: {}",
                    error.tag(),
                    self.source,
                    error.detail()
                );
                self.phase = Phase::Errored;
                if let Some(max) = self.policy.max_retries {
                    if self.retry_count >= max {
                        self.pending_retry = None;
                        return Effect::GaveUp;
                    }
                }
                self.pending_retry = Some(attempt);
                Effect::ArmRetry {
                    attempt,
                    delay: self.policy.delay,
                }
            }
            Message::RetryElapsed { attempt } => {
                if self.pending_retry != Some(attempt) {
                    return Effect::None;
                }
                self.pending_retry = None;
                self.retry_count += 1;
                self.phase = Phase::Loading;
                Effect::RestartLoad {
                    attempt: self.attempt(),
                }
            }
            Message::SourceChanged { source } => {
                if source == self.source {
                    return Effect::None;
                }
                self.source = source;
                self.source_serial += 1;
                self.phase = Phase::Loading;
                self.pending_retry = None;
                Effect::RestartLoad {
                    attempt: self.attempt(),
                }
            }
        }
    }

    /// Identity of the current load attempt.
    #[must_use]
    pub fn attempt(&self) -> AttemptKey {
        AttemptKey {
            source_serial: self.source_serial,
            retry: self.retry_count,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    #[must_use]
    pub fn source(&self) -> &PathBuf {
        &self.source
    }

    /// The armed recovery timer, if any. The host derives its one-shot
    /// timer subscription from this, so clearing it cancels the timer.
    #[must_use]
    pub fn pending_retry(&self) -> Option<AttemptKey> {
        self.pending_retry
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        self.policy.delay
    }

    /// Media is always mounted; visibility is opacity-driven so a
    /// recovered feed appears without remount flicker.
    #[must_use]
    pub fn media_opacity(&self) -> f32 {
        match self.phase {
            Phase::Ready => 1.0,
            Phase::Loading | Phase::Errored => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> FeedError {
        FeedError::LoadFailure("connection reset".into())
    }

    fn new_state() -> State {
        State::new(PathBuf::from("/feeds/1.mp4"), RetryPolicy::default())
    }

    #[test]
    fn fresh_tile_starts_loading_with_zero_retries() {
        let state = new_state();
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.retry_count(), 0);
        assert!(state.pending_retry().is_none());
        assert_eq!(state.media_opacity(), 0.0);
    }

    #[test]
    fn successful_start_reaches_ready_without_arming_timer() {
        let mut state = new_state();
        let effect = state.handle(Message::PlaybackStarted {
            attempt: state.attempt(),
        });

        assert_eq!(effect, Effect::None);
        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(state.media_opacity(), 1.0);
        assert!(state.pending_retry().is_none());
    }

    #[test]
    fn failure_enters_errored_and_arms_single_timer() {
        let mut state = new_state();
        let attempt = state.attempt();
        let effect = state.handle(Message::PlaybackFailed {
            attempt,
            error: failure(),
        });

        assert_eq!(
            effect,
            Effect::ArmRetry {
                attempt,
                delay: DEFAULT_RETRY_DELAY
            }
        );
        assert_eq!(state.phase(), Phase::Errored);
        assert_eq!(state.media_opacity(), 0.0);
        assert_eq!(state.pending_retry(), Some(attempt));
    }

    #[test]
    fn duplicate_failure_does_not_rearm() {
        let mut state = new_state();
        let attempt = state.attempt();
        state.handle(Message::PlaybackFailed {
            attempt,
            error: failure(),
        });
        let effect = state.handle(Message::PlaybackFailed {
            attempt,
            error: failure(),
        });

        assert_eq!(effect, Effect::None);
        assert_eq!(state.pending_retry(), Some(attempt));
    }

    #[test]
    fn retry_elapsed_increments_count_and_reenters_loading() {
        let mut state = new_state();
        let attempt = state.attempt();
        state.handle(Message::PlaybackFailed {
            attempt,
            error: failure(),
        });

        let effect = state.handle(Message::RetryElapsed { attempt });

        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.retry_count(), 1);
        assert_eq!(
            effect,
            Effect::RestartLoad {
                attempt: AttemptKey {
                    source_serial: 0,
                    retry: 1
                }
            }
        );
    }

    #[test]
    fn consumed_timer_cannot_fire_twice() {
        let mut state = new_state();
        let attempt = state.attempt();
        state.handle(Message::PlaybackFailed {
            attempt,
            error: failure(),
        });
        state.handle(Message::RetryElapsed { attempt });

        let effect = state.handle(Message::RetryElapsed { attempt });
        assert_eq!(effect, Effect::None);
        assert_eq!(state.retry_count(), 1);
    }

    #[test]
    fn source_change_cancels_timer_and_restarts_loading() {
        let mut state = new_state();
        let attempt = state.attempt();
        state.handle(Message::PlaybackFailed {
            attempt,
            error: failure(),
        });
        assert!(state.pending_retry().is_some());

        let effect = state.handle(Message::SourceChanged {
            source: PathBuf::from("/feeds/replacement.mp4"),
        });

        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.pending_retry().is_none());
        // Cancellation itself leaves the retry count alone.
        assert_eq!(state.retry_count(), 0);
        assert_eq!(
            effect,
            Effect::RestartLoad {
                attempt: AttemptKey {
                    source_serial: 1,
                    retry: 0
                }
            }
        );
    }

    #[test]
    fn source_change_resets_lifecycle_from_ready() {
        let mut state = new_state();
        state.handle(Message::PlaybackStarted {
            attempt: state.attempt(),
        });
        assert_eq!(state.phase(), Phase::Ready);

        state.handle(Message::SourceChanged {
            source: PathBuf::from("/feeds/replacement.mp4"),
        });
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.media_opacity(), 0.0);
    }

    #[test]
    fn unchanged_source_is_a_no_op() {
        let mut state = new_state();
        state.handle(Message::PlaybackStarted {
            attempt: state.attempt(),
        });

        let effect = state.handle(Message::SourceChanged {
            source: PathBuf::from("/feeds/1.mp4"),
        });
        assert_eq!(effect, Effect::None);
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[test]
    fn stale_timer_from_superseded_source_is_ignored() {
        let mut state = new_state();
        let old_attempt = state.attempt();
        state.handle(Message::PlaybackFailed {
            attempt: old_attempt,
            error: failure(),
        });
        state.handle(Message::SourceChanged {
            source: PathBuf::from("/feeds/replacement.mp4"),
        });

        // The old episode's timer fires late; nothing may move.
        let effect = state.handle(Message::RetryElapsed {
            attempt: old_attempt,
        });
        assert_eq!(effect, Effect::None);
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.retry_count(), 0);
    }

    #[test]
    fn events_from_previous_attempt_are_ignored() {
        let mut state = new_state();
        let first = state.attempt();
        state.handle(Message::PlaybackFailed {
            attempt: first,
            error: failure(),
        });
        state.handle(Message::RetryElapsed { attempt: first });

        // A success from the dead first attempt must not flip phase.
        let effect = state.handle(Message::PlaybackStarted { attempt: first });
        assert_eq!(effect, Effect::None);
        assert_eq!(state.phase(), Phase::Loading);
    }

    #[test]
    fn failure_after_ready_reenters_recovery() {
        let mut state = new_state();
        let attempt = state.attempt();
        state.handle(Message::PlaybackStarted { attempt });
        let effect = state.handle(Message::PlaybackFailed {
            attempt,
            error: FeedError::PlaybackStartFailure("decode stalled".into()),
        });

        assert_eq!(state.phase(), Phase::Errored);
        assert!(matches!(effect, Effect::ArmRetry { .. }));
    }

    #[test]
    fn retry_ceiling_stops_rearming() {
        let mut state = State::new(
            PathBuf::from("/feeds/1.mp4"),
            RetryPolicy {
                delay: Duration::from_millis(100),
                max_retries: Some(1),
            },
        );

        let first = state.attempt();
        assert!(matches!(
            state.handle(Message::PlaybackFailed {
                attempt: first,
                error: failure()
            }),
            Effect::ArmRetry { .. }
        ));
        state.handle(Message::RetryElapsed { attempt: first });

        let second = state.attempt();
        let effect = state.handle(Message::PlaybackFailed {
            attempt: second,
            error: failure(),
        });
        assert_eq!(effect, Effect::GaveUp);
        assert!(state.pending_retry().is_none());
        assert_eq!(state.phase(), Phase::Errored);
    }

    #[test]
    fn retry_count_never_decreases_across_recoveries() {
        let mut state = new_state();
        for expected in 1..=3 {
            let attempt = state.attempt();
            state.handle(Message::PlaybackFailed {
                attempt,
                error: failure(),
            });
            state.handle(Message::RetryElapsed { attempt });
            assert_eq!(state.retry_count(), expected);
        }
    }
}
