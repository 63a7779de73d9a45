//! Core types for the player state machine

use serde::{Deserialize, Serialize};

/// Default ambient stream volume (linear, 0.0-1.0)
pub const DEFAULT_AMBIENT_VOLUME: f32 = 0.3;

/// Default ambient stream source
pub const DEFAULT_AMBIENT_SOURCE: &str = "assets/rain.mp3";

/// Play/pause state of the primary output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    /// Track loaded (or nothing selected), not playing
    #[default]
    Paused,

    /// Playing, or assumed playing after an unconfirmed play command
    Playing,
}

/// Progress of the currently selected track
///
/// Times are in seconds, as reported by the native output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Paused or Playing
    pub state: PlayState,

    /// Current position, reset to 0 on every selection change
    pub current_time: f64,

    /// Duration of the current track (0 until known)
    pub duration: f64,
}

impl PlaybackState {
    /// Whether the primary output is (assumed) playing
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Position as a fraction of the duration, 0.0 when the duration is unknown
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// On/off state of the ambient stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbientState {
    /// Whether the ambient stream is running
    pub is_on: bool,
}

/// Lifecycle of the initial track fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LoadState {
    /// Fetch pending, playback controls inert
    #[default]
    Loading,

    /// Tracks delivered (possibly an empty list)
    Ready,

    /// Fetch failed, track list left empty
    Failed {
        /// User-visible failure message
        message: String,
    },
}

impl LoadState {
    /// Whether the fetch is still pending
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Configuration for the player session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial primary volume (0-100, default: 80)
    #[serde(default = "default_volume")]
    pub volume: u8,

    /// Ambient stream volume (0.0-1.0, default: 0.3)
    #[serde(default = "default_ambient_volume")]
    pub ambient_volume: f32,

    /// Ambient stream source URL or path
    #[serde(default = "default_ambient_source")]
    pub ambient_source: String,

    /// Reconcile to Paused when the output rejects a play command
    ///
    /// Off by default: the player assumes play succeeded, as the web player
    /// always did.
    #[serde(default)]
    pub revert_on_play_rejection: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            ambient_volume: default_ambient_volume(),
            ambient_source: default_ambient_source(),
            revert_on_play_rejection: false,
        }
    }
}

fn default_volume() -> u8 {
    80
}

fn default_ambient_volume() -> f32 {
    DEFAULT_AMBIENT_VOLUME
}

fn default_ambient_source() -> String {
    DEFAULT_AMBIENT_SOURCE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.volume, 80);
        assert_eq!(config.ambient_volume, 0.3);
        assert_eq!(config.ambient_source, "assets/rain.mp3");
        assert!(!config.revert_on_play_rejection);
    }

    #[test]
    fn initial_playback_state_is_paused_at_zero() {
        let state = PlaybackState::default();
        assert_eq!(state.state, PlayState::Paused);
        assert!(!state.is_playing());
        assert_eq!(state.current_time, 0.0);
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn progress_is_clamped() {
        let state = PlaybackState {
            state: PlayState::Playing,
            current_time: 45.0,
            duration: 30.0,
        };
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn load_state_serializes_with_status_tag() {
        let json = serde_json::to_value(LoadState::Failed {
            message: "offline".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["message"], "offline");
    }
}
