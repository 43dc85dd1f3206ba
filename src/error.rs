// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Feed(FeedError),
}

/// Failure taxonomy for a single feed load attempt.
///
/// Both variants land the tile in the same errored phase; they are only
/// distinguished in diagnostic output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The source could not be opened at all (missing file, no video
    /// stream, unsupported container).
    LoadFailure(String),

    /// The source opened but playback never produced a frame (codec
    /// setup, packet decode or scaling failed before the first frame).
    PlaybackStartFailure(String),
}

impl FeedError {
    /// Short diagnostic tag used when logging the failure.
    pub fn tag(&self) -> &'static str {
        match self {
            FeedError::LoadFailure(_) => "load-failure",
            FeedError::PlaybackStartFailure(_) => "playback-start-failure",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            FeedError::LoadFailure(msg) | FeedError::PlaybackStartFailure(msg) => msg,
        }
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::LoadFailure(msg) => write!(f, "Feed failed to load: {}", msg),
            FeedError::PlaybackStartFailure(msg) => {
                write!(f, "Feed loaded but playback failed to start: {}", msg)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Feed(e) => write!(f, "Feed Error: {}", e),
        }
    }
}

impl From<FeedError> for Error {
    fn from(err: FeedError) -> Self {
        Error::Feed(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn feed_error_converts_to_feed_variant() {
        let err: Error = FeedError::LoadFailure("no such file".into()).into();
        assert!(matches!(err, Error::Feed(FeedError::LoadFailure(_))));
    }

    #[test]
    fn feed_error_tags_distinguish_variants() {
        assert_eq!(FeedError::LoadFailure(String::new()).tag(), "load-failure");
        assert_eq!(
            FeedError::PlaybackStartFailure(String::new()).tag(),
            "playback-start-failure"
        );
    }

    #[test]
    fn playback_start_failure_display_mentions_start() {
        let err = FeedError::PlaybackStartFailure("scaler".into());
        assert!(format!("{}", err).contains("failed to start"));
    }
}
