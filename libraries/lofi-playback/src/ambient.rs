//! Ambient sound toggle
//!
//! A looping secondary stream (rain) on its own output handle. It shares
//! nothing with the playback controller; both may run at the same time.

use crate::{events::PlayerEvent, output::AudioOutput, types::AmbientState};
use tracing::{debug, warn};

/// On/off control for the ambient stream
pub struct AmbientSound<O: AudioOutput> {
    output: O,
    state: AmbientState,
    volume: f32,
    pending_events: Vec<PlayerEvent>,
}

impl<O: AudioOutput> AmbientSound<O> {
    /// Load `source` into `output`; the stream starts off
    ///
    /// `volume` is clamped to 0.0-1.0.
    pub fn new(mut output: O, source: &str, volume: f32) -> Self {
        output.set_source(source);

        Self {
            output,
            state: AmbientState::default(),
            volume: volume.clamp(0.0, 1.0),
            pending_events: Vec::new(),
        }
    }

    /// Flip the stream on or off
    ///
    /// On: loop at the attenuated volume and start. Off: pause and rewind.
    pub fn toggle(&mut self) {
        self.state.is_on = !self.state.is_on;

        if self.state.is_on {
            self.output.set_loop(true);
            self.output.set_volume(self.volume);
            if let Err(e) = self.output.play() {
                self.on_play_rejected(&e.to_string());
            }
        } else {
            self.output.pause();
            self.output.set_current_time(0.0);
        }

        debug!(is_on = self.state.is_on, "Ambient sound toggled");
        self.pending_events.push(PlayerEvent::AmbientChanged {
            is_on: self.state.is_on,
        });
    }

    /// The output rejected play, now or after accepting it
    ///
    /// The stream stays on, like the primary output. Ignored once toggled off.
    pub fn on_play_rejected(&mut self, reason: &str) {
        if !self.state.is_on {
            debug!(reason, "Ignoring ambient rejection, stream is off");
            return;
        }
        warn!(reason, "Ambient output rejected play");
        self.pending_events.push(PlayerEvent::Error {
            message: reason.to_string(),
        });
    }

    pub fn state(&self) -> AmbientState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state.is_on
    }

    /// Linear volume used while on
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaybackError;
    use crate::output::MockAudioOutput;
    use mockall::predicate::eq;
    use mockall::Sequence;

    #[test]
    fn starts_off_with_source_loaded() {
        let mut output = MockAudioOutput::new();
        output
            .expect_set_source()
            .withf(|url| url == "assets/rain.mp3")
            .times(1)
            .return_const(());

        let ambient = AmbientSound::new(output, "assets/rain.mp3", 0.3);

        assert!(!ambient.is_on());
    }

    #[test]
    fn toggle_on_loops_at_fixed_volume() {
        let mut seq = Sequence::new();
        let mut output = MockAudioOutput::new();
        output.expect_set_source().return_const(());
        output
            .expect_set_loop()
            .with(eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        output
            .expect_set_volume()
            .with(eq(0.3))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        output
            .expect_play()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));

        let mut ambient = AmbientSound::new(output, "rain.mp3", 0.3);
        ambient.toggle();

        assert!(ambient.is_on());
        assert_eq!(
            ambient.drain_events(),
            vec![PlayerEvent::AmbientChanged { is_on: true }]
        );
    }

    #[test]
    fn toggle_off_pauses_and_rewinds() {
        let mut output = MockAudioOutput::new();
        output.expect_set_source().return_const(());
        output.expect_set_loop().return_const(());
        output.expect_set_volume().return_const(());
        output.expect_play().returning(|| Ok(()));
        output.expect_pause().times(1).return_const(());
        output
            .expect_set_current_time()
            .with(eq(0.0))
            .times(1)
            .return_const(());

        let mut ambient = AmbientSound::new(output, "rain.mp3", 0.3);
        ambient.toggle();
        ambient.toggle();

        assert!(!ambient.is_on());
    }

    #[test]
    fn rejected_play_keeps_state_on() {
        let mut output = MockAudioOutput::new();
        output.expect_set_source().return_const(());
        output.expect_set_loop().return_const(());
        output.expect_set_volume().return_const(());
        output
            .expect_play()
            .returning(|| Err(PlaybackError::AudioOutput("blocked".to_string())));

        let mut ambient = AmbientSound::new(output, "rain.mp3", 0.3);
        ambient.toggle();

        assert!(ambient.is_on());
        let events = ambient.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], PlayerEvent::Error { .. }));
    }

    #[test]
    fn late_rejection_reports_error_while_on() {
        let mut output = MockAudioOutput::new();
        output.expect_set_source().return_const(());
        output.expect_set_loop().return_const(());
        output.expect_set_volume().return_const(());
        output.expect_play().returning(|| Ok(()));

        let mut ambient = AmbientSound::new(output, "rain.mp3", 0.3);
        ambient.toggle();
        ambient.drain_events();

        ambient.on_play_rejected("NotAllowedError");

        assert!(ambient.is_on());
        assert_eq!(
            ambient.drain_events(),
            vec![PlayerEvent::Error {
                message: "NotAllowedError".to_string()
            }]
        );
    }

    #[test]
    fn late_rejection_after_toggle_off_is_ignored() {
        let mut output = MockAudioOutput::new();
        output.expect_set_source().return_const(());

        let mut ambient = AmbientSound::new(output, "rain.mp3", 0.3);
        ambient.on_play_rejected("NotAllowedError");

        assert!(ambient.drain_events().is_empty());
    }

    #[test]
    fn volume_is_clamped() {
        let mut output = MockAudioOutput::new();
        output.expect_set_source().return_const(());

        let ambient = AmbientSound::new(output, "rain.mp3", 4.0);

        assert_eq!(ambient.volume(), 1.0);
    }
}
