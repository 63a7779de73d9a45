//! WASM-compatible PlayerSession wrapper

use super::output::HtmlAudioOutput;
use crate::{PlayState, PlayerConfig, PlayerEvent, PlayerSession};
use js_sys::Function;
use lofi_core::Track;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

type Session = PlayerSession<HtmlAudioOutput, HtmlAudioOutput>;
type EventCallback = Rc<RefCell<Option<Function>>>;

/// WASM-compatible player
///
/// The page forwards the primary element's `timeupdate`, `loadedmetadata`
/// and `ended` notifications, and re-renders from the `onEvent` callback.
/// Play rejections reported by either element reach the session (and the
/// callback) as soon as the browser settles the play promise.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: Rc<RefCell<Session>>,

    // Event callback, shared with the outputs' rejection handlers
    on_event: EventCallback,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player over the primary and ambient `<audio>` elements
    ///
    /// `config` is an optional `PlayerConfig` object; missing fields take
    /// their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        primary: HtmlAudioElement,
        ambient: HtmlAudioElement,
        config: JsValue,
    ) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid player config: {}", e)))?
        };

        let on_event: EventCallback = Rc::new(RefCell::new(None));
        let inner = Rc::new_cyclic(|session: &Weak<RefCell<Session>>| {
            let primary = HtmlAudioOutput::new(
                primary,
                rejection_handler(session.clone(), Rc::clone(&on_event), Session::on_play_rejected),
            );
            let ambient = HtmlAudioOutput::new(
                ambient,
                rejection_handler(
                    session.clone(),
                    Rc::clone(&on_event),
                    Session::on_ambient_rejected,
                ),
            );
            RefCell::new(PlayerSession::new(primary, ambient, &config))
        });

        Ok(Self { inner, on_event })
    }

    // ===== Load Lifecycle =====

    /// Populate the list with fetched tracks
    #[wasm_bindgen(js_name = loadTracks)]
    pub fn load_tracks(&self, tracks: JsValue) -> Result<(), JsValue> {
        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;

        self.dispatch(|session| session.tracks_loaded(tracks));
        Ok(())
    }

    #[wasm_bindgen(js_name = tracksFailed)]
    pub fn tracks_failed(&self, message: &str) {
        self.dispatch(|session| session.tracks_failed(message));
    }

    // ===== UI Intents =====

    #[wasm_bindgen(js_name = onPlayPause)]
    pub fn on_play_pause(&self) {
        self.dispatch(Session::on_play_pause);
    }

    #[wasm_bindgen(js_name = onNext)]
    pub fn on_next(&self) {
        self.dispatch(Session::on_next);
    }

    #[wasm_bindgen(js_name = onPrev)]
    pub fn on_prev(&self) {
        self.dispatch(Session::on_prev);
    }

    #[wasm_bindgen(js_name = onSeek)]
    pub fn on_seek(&self, seconds: f64) {
        self.dispatch(|session| session.on_seek(seconds));
    }

    #[wasm_bindgen(js_name = onSelect)]
    pub fn on_select(&self, index: usize) -> Result<(), JsValue> {
        self.dispatch(|session| session.on_select(index))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = onReorder)]
    pub fn on_reorder(&self, from: usize, to: usize) -> Result<(), JsValue> {
        self.dispatch(|session| session.on_reorder(from, to))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = onToggleAmbient)]
    pub fn on_toggle_ambient(&self) {
        self.dispatch(Session::on_toggle_ambient);
    }

    // ===== Volume Control =====

    /// Set volume (0-100)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: u8) {
        self.dispatch(|session| session.on_volume(level));
    }

    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> u8 {
        self.inner.borrow().volume()
    }

    pub fn mute(&self) {
        self.dispatch(Session::on_mute);
    }

    pub fn unmute(&self) {
        self.dispatch(Session::on_unmute);
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) {
        self.dispatch(Session::on_toggle_mute);
    }

    #[wasm_bindgen(js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.inner.borrow().is_muted()
    }

    // ===== Media Notifications =====

    #[wasm_bindgen(js_name = onTimeUpdate)]
    pub fn on_time_update(&self, seconds: f64) {
        self.dispatch(|session| session.on_time_update(seconds));
    }

    #[wasm_bindgen(js_name = onDurationKnown)]
    pub fn on_duration_known(&self, seconds: f64) {
        self.dispatch(|session| session.on_duration_known(seconds));
    }

    #[wasm_bindgen(js_name = onTrackEnded)]
    pub fn on_track_ended(&self) {
        self.dispatch(Session::on_track_ended);
    }

    // ===== State Queries =====

    /// Current state as string ("paused" | "playing")
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        match self.inner.borrow().playback_state().state {
            PlayState::Paused => "paused".to_string(),
            PlayState::Playing => "playing".to_string(),
        }
    }

    #[wasm_bindgen(js_name = getCurrentTime)]
    pub fn get_current_time(&self) -> f64 {
        self.inner.borrow().playback_state().current_time
    }

    #[wasm_bindgen(js_name = getDuration)]
    pub fn get_duration(&self) -> f64 {
        self.inner.borrow().playback_state().duration
    }

    /// Position as a fraction (0.0 - 1.0) for the progress bar
    #[wasm_bindgen(js_name = getProgress)]
    pub fn get_progress(&self) -> f64 {
        self.inner.borrow().playback_state().progress()
    }

    #[wasm_bindgen(js_name = getSelection)]
    pub fn get_selection(&self) -> Option<usize> {
        self.inner.borrow().selection()
    }

    #[wasm_bindgen(js_name = isAmbientOn)]
    pub fn is_ambient_on(&self) -> bool {
        self.inner.borrow().ambient_state().is_on
    }

    /// Track list as an array of objects
    #[wasm_bindgen(js_name = getTracks)]
    pub fn get_tracks(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.borrow().tracks()).unwrap_or(JsValue::NULL)
    }

    /// Load lifecycle as `{ status, message? }`
    #[wasm_bindgen(js_name = getLoadState)]
    pub fn get_load_state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.borrow().load_state()).unwrap_or(JsValue::NULL)
    }

    // ===== Event Listeners =====

    /// Register the event callback, called once per `PlayerEvent`
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Function) {
        *self.on_event.borrow_mut() = Some(callback);
    }
}

impl WasmPlayer {
    /// Run `f` on the session, then hand its events to the callback
    ///
    /// The session borrow ends before JS runs, so callbacks may call back in.
    fn dispatch<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let (result, events) = {
            let mut session = self.inner.borrow_mut();
            let result = f(&mut *session);
            (result, session.drain_events())
        };
        emit(&self.on_event, events);
        result
    }
}

/// Handler for late play rejections of one output
fn rejection_handler(
    session: Weak<RefCell<Session>>,
    on_event: EventCallback,
    report: fn(&mut Session, &str),
) -> impl Fn(String) + 'static {
    move |reason: String| {
        // Player already freed
        let Some(session) = session.upgrade() else {
            return;
        };
        let events = match session.try_borrow_mut() {
            Ok(mut session) => {
                report(&mut *session, &reason);
                session.drain_events()
            }
            Err(_) => {
                web_sys::console::warn_1(&JsValue::from_str(
                    "play() rejection arrived while the player was busy",
                ));
                return;
            }
        };
        emit(&on_event, events);
    }
}

fn emit(on_event: &EventCallback, events: Vec<PlayerEvent>) {
    let Some(cb) = on_event.borrow().clone() else {
        return;
    };
    for event in events {
        if let Ok(js_event) = serde_wasm_bindgen::to_value(&event) {
            cb.call1(&JsValue::NULL, &js_event).ok();
        }
    }
}
