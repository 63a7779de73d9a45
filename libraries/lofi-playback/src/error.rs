//! Error types for the player core

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Index outside the track list
    ///
    /// A caller bug: the presentation layer only offers valid positions.
    #[error("Index {index} out of range for {len} tracks")]
    OutOfRange { index: usize, len: usize },

    /// Native audio output rejected a command
    #[error("Audio output error: {0}")]
    AudioOutput(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
