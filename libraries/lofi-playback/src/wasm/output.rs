//! `AudioOutput` backed by an `HtmlAudioElement`

use crate::{error::PlaybackError, output::is_interrupted_play, output::AudioOutput, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlAudioElement;

/// Browser media element as an output handle
///
/// `play()` on a media element settles asynchronously. Synchronous failures
/// are returned directly; a late rejection is passed to the handler given at
/// construction as soon as the promise settles. Rejections caused by a new
/// source or a pause (`AbortError`) are dropped.
pub struct HtmlAudioOutput {
    element: HtmlAudioElement,
    // Shared by every pending play promise; lives as long as the output
    on_reject: Closure<dyn FnMut(JsValue)>,
}

impl HtmlAudioOutput {
    pub fn new(element: HtmlAudioElement, on_rejected: impl Fn(String) + 'static) -> Self {
        let on_reject = Closure::<dyn FnMut(JsValue)>::new(move |reason: JsValue| {
            if is_interrupted_play(&js_error_name(&reason)) {
                return;
            }
            let reason = js_reason(&reason);
            web_sys::console::warn_1(&JsValue::from_str(&format!("play() rejected: {}", reason)));
            on_rejected(reason);
        });

        Self { element, on_reject }
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

impl AudioOutput for HtmlAudioOutput {
    fn set_source(&mut self, url: &str) {
        self.element.set_src(url);
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlaybackError::AudioOutput(js_reason(&e)))?;

        let _ = promise.catch(&self.on_reject);
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            web_sys::console::warn_1(&e);
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn set_volume(&mut self, volume: f32) {
        self.element.set_volume(f64::from(volume));
    }

    fn set_loop(&mut self, looping: bool) {
        self.element.set_loop(looping);
    }
}

fn js_error_name(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.name()))
        .unwrap_or_default()
}

fn js_reason(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| "media element rejected play".to_string())
}
