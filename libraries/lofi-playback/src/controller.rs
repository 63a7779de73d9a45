//! Playback controller - Paused/Playing state machine
//!
//! Owns the primary audio output and the progress of the selected track.
//! The track list itself belongs to the session; the controller only sees it
//! when it has to react to a selection change or advance on track end.

use crate::{
    events::PlayerEvent,
    output::AudioOutput,
    track_list::TrackList,
    types::{PlayState, PlaybackState, PlayerConfig},
    volume::Volume,
};
use lofi_core::{Track, TrackId};
use tracing::{debug, info, warn};

/// Playback controller
///
/// State machine:
/// ```text
///            toggle / ended
///   Paused ─────────────────▶ Playing
///          ◀─────────────────
///               toggle
/// ```
/// Selection changes keep the state: a Playing controller starts the new
/// track, a Paused one only loads it. Track end always plays through.
pub struct PlaybackController<O: AudioOutput> {
    output: O,
    playback: PlaybackState,
    volume: Volume,
    revert_on_play_rejection: bool,

    // Track currently loaded into the output
    loaded_track: Option<TrackId>,

    pending_events: Vec<PlayerEvent>,
}

impl<O: AudioOutput> PlaybackController<O> {
    /// Create a controller owning `output`, initially Paused with nothing loaded
    pub fn new(mut output: O, config: &PlayerConfig) -> Self {
        let volume = Volume::new(config.volume);
        output.set_volume(volume.gain());

        Self {
            output,
            playback: PlaybackState::default(),
            volume,
            revert_on_play_rejection: config.revert_on_play_rejection,
            loaded_track: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Paused → Playing issues play, Playing → Paused issues pause
    ///
    /// No-op when no track is loaded.
    pub fn toggle_play_pause(&mut self) {
        match self.playback.state {
            PlayState::Paused => self.play(),
            PlayState::Playing => self.pause(),
        }
    }

    /// Start playback of the loaded track
    pub fn play(&mut self) {
        if self.loaded_track.is_none() {
            debug!("Play ignored, no track loaded");
            return;
        }
        if self.playback.state == PlayState::Playing {
            return;
        }

        self.set_state(PlayState::Playing);
        self.issue_play();
    }

    /// Pause playback, keeping the position
    pub fn pause(&mut self) {
        if self.loaded_track.is_none() || self.playback.state == PlayState::Paused {
            return;
        }

        self.output.pause();
        self.set_state(PlayState::Paused);
    }

    /// React to a selection change in the track list
    ///
    /// Loads the new track and resets the position. Playing continues on the
    /// new track; Paused only loads it. With nothing selected the output is
    /// paused and the progress cleared.
    pub fn on_selection_changed(&mut self, current: Option<&Track>) {
        let Some(track) = current else {
            if self.loaded_track.take().is_some() {
                self.output.pause();
            }
            self.set_state(PlayState::Paused);
            self.playback.current_time = 0.0;
            self.playback.duration = 0.0;
            self.emit_position_update();
            return;
        };

        debug!(track_id = track.id, title = %track.title, "Loading track");

        self.output.set_source(&track.preview_url);
        self.loaded_track = Some(track.id);
        self.playback.current_time = 0.0;
        self.playback.duration = sanitize_seconds(track.duration_seconds).unwrap_or(0.0);
        self.emit_position_update();

        if self.playback.state == PlayState::Playing {
            self.issue_play();
        }
    }

    /// Native output reached the end of the current track
    ///
    /// Advances the selection (wrapping) and always plays the next track,
    /// whatever the state was before.
    pub fn on_track_ended(&mut self, tracks: &mut TrackList) {
        if tracks.next().is_none() {
            return;
        }

        info!(selection = ?tracks.selection(), "Track ended, advancing");

        self.set_state(PlayState::Playing);
        self.on_selection_changed(tracks.current());
    }

    // ===== Seek =====

    /// Seek to `seconds`, clamped to `[0, duration]`
    ///
    /// Non-finite targets seek to the start. Play/pause state is unchanged.
    pub fn seek(&mut self, seconds: f64) {
        if self.loaded_track.is_none() {
            debug!("Seek ignored, no track loaded");
            return;
        }

        let target = if seconds.is_finite() {
            seconds.clamp(0.0, self.playback.duration.max(0.0))
        } else {
            0.0
        };

        self.playback.current_time = target;
        self.output.set_current_time(target);
        self.emit_position_update();
    }

    // ===== Output Notifications =====

    /// `timeupdate` from the native output
    pub fn on_time_update(&mut self, seconds: f64) {
        if let Some(seconds) = sanitize_seconds(seconds) {
            self.playback.current_time = seconds;
            self.emit_position_update();
        }
    }

    /// `loadedmetadata` from the native output
    ///
    /// Streams without a finite duration (NaN, infinity) are ignored.
    pub fn on_duration_known(&mut self, seconds: f64) {
        if let Some(seconds) = sanitize_seconds(seconds) {
            self.playback.duration = seconds;
            self.emit_position_update();
        }
    }

    /// The output rejected a play command after accepting it
    ///
    /// For hosts whose play resolves asynchronously (browser promises).
    pub fn on_play_rejected(&mut self, reason: &str) {
        self.handle_play_rejection(reason.to_string());
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Get current volume level (0-100)
    pub fn get_volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    // ===== State Queries =====

    pub fn state(&self) -> &PlaybackState {
        &self.playback
    }

    /// ID of the track loaded into the output
    pub fn loaded_track(&self) -> Option<TrackId> {
        self.loaded_track
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internal =====

    fn issue_play(&mut self) {
        if let Err(e) = self.output.play() {
            self.handle_play_rejection(e.to_string());
        }
    }

    fn handle_play_rejection(&mut self, reason: String) {
        warn!(reason = %reason, "Audio output rejected play");

        if self.revert_on_play_rejection {
            self.set_state(PlayState::Paused);
        }

        self.pending_events.push(PlayerEvent::Error { message: reason });
    }

    fn set_state(&mut self, state: PlayState) {
        if self.playback.state != state {
            self.playback.state = state;
            self.pending_events.push(PlayerEvent::StateChanged { state });
        }
    }

    fn apply_volume(&mut self) {
        self.output.set_volume(self.volume.gain());
        self.pending_events.push(PlayerEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlayerEvent::PositionUpdate {
            current_time: self.playback.current_time,
            duration: self.playback.duration,
        });
    }
}

fn sanitize_seconds(seconds: f64) -> Option<f64> {
    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}
