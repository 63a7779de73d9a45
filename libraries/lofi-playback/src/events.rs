//! Player Events
//!
//! Event-based communication for UI synchronization. The presentation layer
//! drains the queue after forwarding an intent or a media notification and
//! re-renders from the events (or simply from the session getters).

use crate::types::{LoadState, PlayState};
use lofi_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the player session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerEvent {
    /// Track fetch finished or failed
    LoadStateChanged {
        /// The new load state
        state: LoadState,
    },

    /// Track list replaced after a fetch
    TracksReplaced {
        /// New list length
        length: usize,
    },

    /// Selection moved to another position
    SelectionChanged {
        /// New selected index (`None` for an empty list)
        index: Option<usize>,
        /// ID of the newly selected track
        track_id: Option<TrackId>,
        /// ID of the previously selected track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Two tracks swapped places
    TrackReordered {
        from: usize,
        to: usize,
        /// Selection after the swap (follows the selected track)
        selection: Option<usize>,
    },

    /// Play/pause state changed
    StateChanged {
        /// The new state
        state: PlayState,
    },

    /// Position or duration of the current track changed
    PositionUpdate {
        /// Current position in seconds
        current_time: f64,
        /// Duration in seconds (0 until known)
        duration: f64,
    },

    /// Primary volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Ambient stream switched on or off
    AmbientChanged { is_on: bool },

    /// Non-fatal error (rejected play command, failed fetch)
    Error {
        /// Error message
        message: String,
    },
}
