//! Simulated audio output
//!
//! Terminal hosts have no media element, so a [`MediaClock`] stands in for
//! one: it tracks source, position and play state, and produces the
//! `loadedmetadata` / `timeupdate` / `ended` notifications a browser would.

use lofi_playback::{AudioOutput, PlaybackError, Result};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Notification produced by advancing the clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaNotification {
    DurationKnown(f64),
    TimeUpdate(f64),
    Ended,
}

/// Playback position of one simulated output
#[derive(Debug, Clone)]
pub struct MediaClock {
    source: Option<String>,
    position: f64,
    duration: f64,
    playing: bool,
    looping: bool,
    volume: f32,
    metadata_sent: bool,
}

impl MediaClock {
    /// Every source loaded into this clock lasts `duration` seconds
    pub fn new(duration: f64) -> Self {
        Self {
            source: None,
            position: 0.0,
            duration,
            playing: false,
            looping: false,
            volume: 1.0,
            metadata_sent: false,
        }
    }

    pub fn shared(duration: f64) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(duration)))
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Advance by `elapsed` and report what a media element would
    ///
    /// Metadata is reported once per source, on the first advance after it
    /// was loaded. A looping clock wraps instead of ending.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<MediaNotification> {
        let mut notifications = Vec::new();
        if self.source.is_none() {
            return notifications;
        }

        if !self.metadata_sent {
            self.metadata_sent = true;
            notifications.push(MediaNotification::DurationKnown(self.duration));
        }

        if !self.playing {
            return notifications;
        }

        self.position += elapsed.as_secs_f64();

        if self.position >= self.duration {
            if self.looping {
                self.position %= self.duration;
            } else {
                self.position = self.duration;
                self.playing = false;
                notifications.push(MediaNotification::TimeUpdate(self.position));
                notifications.push(MediaNotification::Ended);
                return notifications;
            }
        }

        notifications.push(MediaNotification::TimeUpdate(self.position));
        notifications
    }
}

/// `AudioOutput` over a shared [`MediaClock`]
pub struct SimulatedOutput {
    name: &'static str,
    clock: Rc<RefCell<MediaClock>>,
}

impl SimulatedOutput {
    pub fn new(name: &'static str, clock: Rc<RefCell<MediaClock>>) -> Self {
        Self { name, clock }
    }
}

impl AudioOutput for SimulatedOutput {
    fn set_source(&mut self, url: &str) {
        debug!(output = self.name, url, "set_source");
        let mut clock = self.clock.borrow_mut();
        clock.source = Some(url.to_string());
        clock.position = 0.0;
        clock.playing = false;
        clock.metadata_sent = false;
    }

    fn play(&mut self) -> Result<()> {
        debug!(output = self.name, "play");
        let mut clock = self.clock.borrow_mut();
        if clock.source.is_none() {
            return Err(PlaybackError::AudioOutput(format!(
                "{} output has no source",
                self.name
            )));
        }
        clock.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        debug!(output = self.name, "pause");
        self.clock.borrow_mut().playing = false;
    }

    fn set_current_time(&mut self, seconds: f64) {
        debug!(output = self.name, seconds, "set_current_time");
        let mut clock = self.clock.borrow_mut();
        clock.position = seconds.clamp(0.0, clock.duration);
    }

    fn set_volume(&mut self, volume: f32) {
        debug!(output = self.name, volume, "set_volume");
        self.clock.borrow_mut().volume = volume;
    }

    fn set_loop(&mut self, looping: bool) {
        debug!(output = self.name, looping, "set_loop");
        self.clock.borrow_mut().looping = looping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_output(duration: f64) -> (SimulatedOutput, Rc<RefCell<MediaClock>>) {
        let clock = MediaClock::shared(duration);
        let mut output = SimulatedOutput::new("primary", Rc::clone(&clock));
        output.set_source("https://cdn.example.com/1.mp3");
        output.play().unwrap();
        (output, clock)
    }

    #[test]
    fn idle_clock_reports_nothing() {
        let mut clock = MediaClock::new(30.0);

        assert!(clock.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn play_without_source_is_rejected() {
        let mut output = SimulatedOutput::new("primary", MediaClock::shared(30.0));

        assert!(matches!(output.play(), Err(PlaybackError::AudioOutput(_))));
    }

    #[test]
    fn metadata_precedes_first_time_update() {
        let (_output, clock) = playing_output(30.0);

        let notifications = clock.borrow_mut().advance(Duration::from_millis(500));

        assert_eq!(
            notifications,
            vec![
                MediaNotification::DurationKnown(30.0),
                MediaNotification::TimeUpdate(0.5),
            ]
        );
    }

    #[test]
    fn paused_clock_only_reports_metadata() {
        let clock = MediaClock::shared(30.0);
        let mut output = SimulatedOutput::new("primary", Rc::clone(&clock));
        output.set_source("https://cdn.example.com/1.mp3");

        let first = clock.borrow_mut().advance(Duration::from_secs(1));
        let second = clock.borrow_mut().advance(Duration::from_secs(1));

        assert_eq!(first, vec![MediaNotification::DurationKnown(30.0)]);
        assert!(second.is_empty());
        assert_eq!(clock.borrow().position(), 0.0);
    }

    #[test]
    fn reaching_the_end_fires_ended_once() {
        let (_output, clock) = playing_output(2.0);
        clock.borrow_mut().advance(Duration::from_secs(1));

        let notifications = clock.borrow_mut().advance(Duration::from_secs(5));

        assert_eq!(
            notifications,
            vec![MediaNotification::TimeUpdate(2.0), MediaNotification::Ended]
        );
        assert!(!clock.borrow().is_playing());
        assert!(clock.borrow_mut().advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn looping_clock_wraps() {
        let (mut output, clock) = playing_output(2.0);
        output.set_loop(true);

        let notifications = clock.borrow_mut().advance(Duration::from_millis(2500));

        assert_eq!(notifications.last(), Some(&MediaNotification::TimeUpdate(0.5)));
        assert!(clock.borrow().is_playing());
    }

    #[test]
    fn new_source_rewinds_and_resends_metadata() {
        let (mut output, clock) = playing_output(30.0);
        clock.borrow_mut().advance(Duration::from_secs(3));

        output.set_source("https://cdn.example.com/2.mp3");

        assert_eq!(clock.borrow().position(), 0.0);
        assert_eq!(clock.borrow().source(), Some("https://cdn.example.com/2.mp3"));
        assert_eq!(
            clock.borrow_mut().advance(Duration::from_secs(1)),
            vec![MediaNotification::DurationKnown(30.0)]
        );
    }

    #[test]
    fn seek_is_clamped_to_duration() {
        let (mut output, clock) = playing_output(30.0);

        output.set_current_time(99.0);

        assert_eq!(clock.borrow().position(), 30.0);
    }
}
