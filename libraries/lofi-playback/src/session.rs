//! Player session - the UI-facing surface
//!
//! Composes the track list, the playback controller and the ambient toggle,
//! and tracks the lifecycle of the initial fetch. The presentation layer calls
//! the `on_*` intents, forwards native output notifications, and drains
//! events to re-render.

use crate::{
    ambient::AmbientSound,
    controller::PlaybackController,
    error::Result,
    events::PlayerEvent,
    output::AudioOutput,
    track_list::TrackList,
    types::{AmbientState, LoadState, PlaybackState, PlayerConfig},
};
use lofi_core::{dedupe_by_id, Track, TrackId};
use tracing::{debug, info, warn};

/// Player session
///
/// Single-threaded: every call runs to completion, and a selection change is
/// applied to the track list before the controller reacts to it.
///
/// While the fetch is pending, and whenever the track list is empty, playback
/// intents are inert. The ambient toggle always works.
pub struct PlayerSession<P: AudioOutput, A: AudioOutput> {
    tracks: TrackList,
    playback: PlaybackController<P>,
    ambient: AmbientSound<A>,
    load_state: LoadState,
    pending_events: Vec<PlayerEvent>,
}

impl<P: AudioOutput, A: AudioOutput> PlayerSession<P, A> {
    /// Create a session in the Loading state
    pub fn new(primary: P, ambient: A, config: &PlayerConfig) -> Self {
        let mut session = Self {
            tracks: TrackList::new(),
            playback: PlaybackController::new(primary, config),
            ambient: AmbientSound::new(ambient, &config.ambient_source, config.ambient_volume),
            load_state: LoadState::Loading,
            pending_events: Vec::new(),
        };
        // Construction-time output setup is not an event
        session.playback.drain_events();
        session
    }

    // ===== Load Lifecycle =====

    /// Populate the track list from a successful fetch
    ///
    /// Tracks with an id already seen are dropped.
    pub fn tracks_loaded(&mut self, mut tracks: Vec<Track>) {
        let dropped = dedupe_by_id(&mut tracks);
        if dropped > 0 {
            warn!(dropped, "Dropped tracks with duplicate ids");
        }

        info!(count = tracks.len(), "Tracks loaded");

        let previous = self.current_track_id();
        self.tracks.replace(tracks);
        self.set_load_state(LoadState::Ready);
        self.pending_events.push(PlayerEvent::TracksReplaced {
            length: self.tracks.len(),
        });
        self.selection_changed(previous);
    }

    /// Record a failed fetch; the track list stays empty
    pub fn tracks_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, "Failed to load tracks");

        let previous = self.current_track_id();
        self.tracks.replace(Vec::new());
        self.set_load_state(LoadState::Failed {
            message: message.clone(),
        });
        self.pending_events.push(PlayerEvent::Error { message });
        self.selection_changed(previous);
    }

    // ===== UI Intents =====

    /// Play/pause button
    pub fn on_play_pause(&mut self) {
        if !self.controls_enabled("play/pause") {
            return;
        }
        self.playback.toggle_play_pause();
        self.absorb_events();
    }

    /// Start playback (no-op if already playing)
    pub fn on_play(&mut self) {
        if !self.controls_enabled("play") {
            return;
        }
        self.playback.play();
        self.absorb_events();
    }

    /// Pause playback (no-op if already paused)
    pub fn on_pause(&mut self) {
        if !self.controls_enabled("pause") {
            return;
        }
        self.playback.pause();
        self.absorb_events();
    }

    /// Next button, wrapping to the first track
    pub fn on_next(&mut self) {
        if !self.controls_enabled("next") {
            return;
        }
        let previous = self.current_track_id();
        self.tracks.next();
        self.selection_changed(previous);
    }

    /// Previous button, wrapping to the last track
    pub fn on_prev(&mut self) {
        if !self.controls_enabled("previous") {
            return;
        }
        let previous = self.current_track_id();
        self.tracks.previous();
        self.selection_changed(previous);
    }

    /// Progress bar drag
    pub fn on_seek(&mut self, seconds: f64) {
        if !self.controls_enabled("seek") {
            return;
        }
        self.playback.seek(seconds);
        self.absorb_events();
    }

    /// Track picked from the list
    ///
    /// Fails with `OutOfRange` for an invalid index, leaving all state as is.
    /// That check only applies once tracks are loaded: while loading or with
    /// an empty list every index is accepted as a no-op.
    pub fn on_select(&mut self, index: usize) -> Result<()> {
        if !self.controls_enabled("select") {
            return Ok(());
        }
        let previous = self.current_track_id();
        self.tracks.select(index)?;
        self.selection_changed(previous);
        Ok(())
    }

    /// Drag-and-drop swap of two list positions
    ///
    /// The selected track keeps playing; only its index may change. Like
    /// [`PlayerSession::on_select`], indices are only checked once tracks are
    /// loaded.
    pub fn on_reorder(&mut self, from: usize, to: usize) -> Result<()> {
        if !self.controls_enabled("reorder") {
            return Ok(());
        }
        self.tracks.reorder(from, to)?;
        if from != to {
            self.pending_events.push(PlayerEvent::TrackReordered {
                from,
                to,
                selection: self.tracks.selection(),
            });
        }
        Ok(())
    }

    /// Rain button
    pub fn on_toggle_ambient(&mut self) {
        self.ambient.toggle();
        self.absorb_events();
    }

    /// Set primary volume (0-100)
    pub fn on_volume(&mut self, level: u8) {
        self.playback.set_volume(level);
        self.absorb_events();
    }

    pub fn on_mute(&mut self) {
        self.playback.mute();
        self.absorb_events();
    }

    pub fn on_unmute(&mut self) {
        self.playback.unmute();
        self.absorb_events();
    }

    pub fn on_toggle_mute(&mut self) {
        self.playback.toggle_mute();
        self.absorb_events();
    }

    // ===== Output Notifications =====

    /// `timeupdate` from the primary output
    pub fn on_time_update(&mut self, seconds: f64) {
        self.playback.on_time_update(seconds);
        self.absorb_events();
    }

    /// `loadedmetadata` from the primary output
    pub fn on_duration_known(&mut self, seconds: f64) {
        self.playback.on_duration_known(seconds);
        self.absorb_events();
    }

    /// `ended` from the primary output: auto-advance and play through
    pub fn on_track_ended(&mut self) {
        if !self.controls_enabled("track end") {
            return;
        }
        let previous = self.current_track_id();
        self.playback.on_track_ended(&mut self.tracks);
        self.push_selection_event(previous);
        self.absorb_events();
    }

    /// Late rejection of a play command by the primary output
    pub fn on_play_rejected(&mut self, reason: &str) {
        self.playback.on_play_rejected(reason);
        self.absorb_events();
    }

    /// Late rejection of a play command by the ambient output
    pub fn on_ambient_rejected(&mut self, reason: &str) {
        self.ambient.on_play_rejected(reason);
        self.absorb_events();
    }

    // ===== State Queries =====

    pub fn tracks(&self) -> &[Track] {
        self.tracks.tracks()
    }

    pub fn selection(&self) -> Option<usize> {
        self.tracks.selection()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.current()
    }

    pub fn playback_state(&self) -> &PlaybackState {
        self.playback.state()
    }

    pub fn ambient_state(&self) -> AmbientState {
        self.ambient.state()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn volume(&self) -> u8 {
        self.playback.get_volume()
    }

    pub fn is_muted(&self) -> bool {
        self.playback.is_muted()
    }

    /// Primary output handle
    pub fn primary_output(&self) -> &P {
        self.playback.output()
    }

    /// Ambient output handle
    pub fn ambient_output(&self) -> &A {
        self.ambient.output()
    }

    // ===== Events =====

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn controls_enabled(&self, intent: &str) -> bool {
        if self.load_state.is_loading() {
            debug!(intent, "Intent ignored while loading");
            false
        } else if self.tracks.is_empty() {
            debug!(intent, "Intent ignored, no tracks");
            false
        } else {
            true
        }
    }

    fn current_track_id(&self) -> Option<TrackId> {
        self.tracks.current().map(|t| t.id)
    }

    /// Selection already updated: report it, then let the controller react
    fn selection_changed(&mut self, previous_track_id: Option<TrackId>) {
        self.push_selection_event(previous_track_id);
        self.playback.on_selection_changed(self.tracks.current());
        self.absorb_events();
    }

    fn push_selection_event(&mut self, previous_track_id: Option<TrackId>) {
        self.pending_events.push(PlayerEvent::SelectionChanged {
            index: self.tracks.selection(),
            track_id: self.current_track_id(),
            previous_track_id,
        });
    }

    fn set_load_state(&mut self, state: LoadState) {
        self.load_state = state.clone();
        self.pending_events
            .push(PlayerEvent::LoadStateChanged { state });
    }

    fn absorb_events(&mut self) {
        self.pending_events.extend(self.playback.drain_events());
        self.pending_events.extend(self.ambient.drain_events());
    }
}
