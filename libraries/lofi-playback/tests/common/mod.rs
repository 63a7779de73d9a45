//! Shared helpers for playback integration tests

#![allow(dead_code)]

use lofi_core::Track;
use lofi_playback::{AudioOutput, PlaybackError, PlayerConfig, PlayerSession, Result};

/// Command received by a recording output
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetSource(String),
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f32),
    SetLoop(bool),
}

/// Output handle that records every command
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub commands: Vec<Command>,
    /// Reject play commands with this reason
    pub reject_play: Option<String>,
}

impl RecordingOutput {
    pub fn rejecting(reason: &str) -> Self {
        Self {
            commands: Vec::new(),
            reject_play: Some(reason.to_string()),
        }
    }

    pub fn play_count(&self) -> usize {
        self.commands.iter().filter(|c| **c == Command::Play).count()
    }

    pub fn last_source(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::SetSource(url) => Some(url.as_str()),
            _ => None,
        })
    }
}

impl AudioOutput for RecordingOutput {
    fn set_source(&mut self, url: &str) {
        self.commands.push(Command::SetSource(url.to_string()));
    }

    fn play(&mut self) -> Result<()> {
        self.commands.push(Command::Play);
        match &self.reject_play {
            Some(reason) => Err(PlaybackError::AudioOutput(reason.clone())),
            None => Ok(()),
        }
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.commands.push(Command::SetCurrentTime(seconds));
    }

    fn set_volume(&mut self, volume: f32) {
        self.commands.push(Command::SetVolume(volume));
    }

    fn set_loop(&mut self, looping: bool) {
        self.commands.push(Command::SetLoop(looping));
    }
}

pub type TestSession = PlayerSession<RecordingOutput, RecordingOutput>;

pub fn create_test_track(id: u64) -> Track {
    Track {
        id,
        title: format!("Track {}", id),
        artist: "Test Artist".to_string(),
        album: "Test Album".to_string(),
        cover_url: format!("https://cdn.example.com/{}.jpg", id),
        preview_url: format!("https://cdn.example.com/{}.mp3", id),
        duration_seconds: 30.0,
    }
}

pub fn create_test_tracks(ids: &[u64]) -> Vec<Track> {
    ids.iter().copied().map(create_test_track).collect()
}

/// Session with `ids` loaded and the load events drained
pub fn loaded_session(ids: &[u64]) -> TestSession {
    let mut session = PlayerSession::new(
        RecordingOutput::default(),
        RecordingOutput::default(),
        &PlayerConfig::default(),
    );
    session.tracks_loaded(create_test_tracks(ids));
    session.drain_events();
    session
}

pub fn track_ids(session: &TestSession) -> Vec<u64> {
    session.tracks().iter().map(|t| t.id).collect()
}
