//! Lofi Player - Playback Core
//!
//! Platform-agnostic player state machine and track-list reducer.
//!
//! This crate provides:
//! - Track list with wrapping selection and pairwise reorder
//! - Paused/Playing controller with auto-advance on track end
//! - Seek with clamping, logarithmic volume, mute
//! - Independent looping ambient stream
//! - A session facade exposing the UI callback surface and an event queue
//!
//! # Architecture
//!
//! `lofi-playback` owns no audio I/O and no network access:
//! - Native audio is reached through the [`AudioOutput`] trait
//! - Tracks arrive from the host (see `lofi-catalog`)
//! - Media notifications (`timeupdate`, `loadedmetadata`, `ended`) are
//!   forwarded by the host
//!
//! # Example
//!
//! ```rust
//! use lofi_playback::{AudioOutput, PlayerConfig, PlayerSession, Result};
//! use lofi_core::Track;
//!
//! #[derive(Default)]
//! struct SilentOutput;
//!
//! impl AudioOutput for SilentOutput {
//!     fn set_source(&mut self, _url: &str) {}
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn set_current_time(&mut self, _seconds: f64) {}
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn set_loop(&mut self, _looping: bool) {}
//! }
//!
//! let mut session = PlayerSession::new(SilentOutput, SilentOutput, &PlayerConfig::default());
//!
//! session.tracks_loaded(vec![Track {
//!     id: 1,
//!     title: "Dawn".to_string(),
//!     artist: "Lofi Artist".to_string(),
//!     album: "Mornings".to_string(),
//!     cover_url: String::new(),
//!     preview_url: "https://cdn.example.com/1.mp3".to_string(),
//!     duration_seconds: 30.0,
//! }]);
//!
//! session.on_play_pause();
//! assert!(session.playback_state().is_playing());
//!
//! session.on_toggle_ambient();
//! assert!(session.ambient_state().is_on);
//! ```

mod ambient;
mod controller;
mod error;
mod events;
mod output;
mod session;
mod track_list;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use ambient::AmbientSound;
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use output::{is_interrupted_play, AudioOutput};
pub use session::PlayerSession;
pub use track_list::TrackList;
pub use types::{AmbientState, LoadState, PlayState, PlaybackState, PlayerConfig};
pub use volume::Volume;
