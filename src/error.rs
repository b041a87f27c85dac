// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Playback(PlaybackError),
}

/// Failure modes of an asynchronous play request.
///
/// Neither variant is fatal: the audio session swallows both, logs them
/// and leaves the transport paused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The platform refused to start playback (autoplay policy denial).
    /// Contains the platform's reason when one was given.
    Rejected(String),

    /// The request was superseded before it settled, typically because a
    /// different track was loaded into the resource.
    Aborted,
}

impl PlaybackError {
    /// Returns true if the platform's autoplay policy denied playback.
    pub fn is_policy_denial(&self) -> bool {
        matches!(self, PlaybackError::Rejected(_))
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::Rejected(reason) => write!(f, "Playback rejected: {}", reason),
            PlaybackError::Aborted => write!(f, "Playback request aborted"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Playback(e) => write!(f, "Playback Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<PlaybackError> for Error {
    fn from(err: PlaybackError) -> Self {
        Error::Playback(err)
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

pub type Result<T> = std::result::Result<T, Error>;
