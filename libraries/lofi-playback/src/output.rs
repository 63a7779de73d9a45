//! Platform-agnostic audio output handle
//!
//! Abstracts the native media element (HTMLAudioElement in browsers, a
//! simulated clock in the CLI).

use crate::error::Result;

/// Native audio output handle
///
/// Implementors are command sinks only. Progress notifications (`timeupdate`,
/// `loadedmetadata`, `ended`) flow the other way: the host forwards them to
/// the player session.
#[cfg_attr(test, mockall::automock)]
pub trait AudioOutput {
    /// Load a new source, replacing the current one
    fn set_source(&mut self, url: &str);

    /// Start or resume playback
    ///
    /// # Returns
    /// * `Ok(())` - Command accepted (playback may still start asynchronously)
    /// * `Err(_)` - Rejected (autoplay policy, decoding error, ...)
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Move the playback position
    fn set_current_time(&mut self, seconds: f64);

    /// Set linear output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Loop the source continuously
    fn set_loop(&mut self, looping: bool);
}

/// Whether a late play failure only reports that the request was cut short
///
/// Media elements reject a pending play with `AbortError` when a new source
/// is loaded or the element is paused before playback started. Neither says
/// anything about the source loaded now.
pub fn is_interrupted_play(error_name: &str) -> bool {
    error_name == "AbortError"
}

impl<T: AudioOutput + ?Sized> AudioOutput for Box<T> {
    fn set_source(&mut self, url: &str) {
        (**self).set_source(url);
    }

    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn set_current_time(&mut self, seconds: f64) {
        (**self).set_current_time(seconds);
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }

    fn set_loop(&mut self, looping: bool) {
        (**self).set_loop(looping);
    }
}
