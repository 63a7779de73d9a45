//! Terminal host
//!
//! Binds a [`PlayerSession`] to simulated outputs, turns stdin commands into
//! session intents and renders session events as text.

use crate::commands::{Command, HELP};
use crate::config::AppConfig;
use crate::output::{MediaClock, MediaNotification, SimulatedOutput};
use lofi_core::Track;
use lofi_playback::{LoadState, PlayState, PlayerEvent, PlayerSession};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

pub type TerminalSession = PlayerSession<SimulatedOutput, SimulatedOutput>;

pub struct Terminal {
    session: TerminalSession,
    primary_clock: Rc<RefCell<MediaClock>>,
    ambient_clock: Rc<RefCell<MediaClock>>,
}

impl Terminal {
    pub fn new(config: &AppConfig) -> Self {
        let primary_clock = MediaClock::shared(config.preview_seconds);
        // Rain loops, its length only matters for wrapping
        let ambient_clock = MediaClock::shared(config.preview_seconds);

        let session = PlayerSession::new(
            SimulatedOutput::new("primary", Rc::clone(&primary_clock)),
            SimulatedOutput::new("ambient", Rc::clone(&ambient_clock)),
            &config.player,
        );

        Self {
            session,
            primary_clock,
            ambient_clock,
        }
    }

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TerminalSession {
        &mut self.session
    }

    pub fn primary_clock(&self) -> &Rc<RefCell<MediaClock>> {
        &self.primary_clock
    }

    /// Advance both media clocks and forward the primary's notifications
    pub fn advance(&mut self, elapsed: Duration) {
        self.ambient_clock.borrow_mut().advance(elapsed);

        let notifications = self.primary_clock.borrow_mut().advance(elapsed);
        for notification in notifications {
            match notification {
                MediaNotification::DurationKnown(seconds) => {
                    self.session.on_duration_known(seconds);
                }
                MediaNotification::TimeUpdate(seconds) => self.session.on_time_update(seconds),
                MediaNotification::Ended => self.session.on_track_ended(),
            }
        }
    }

    /// Apply one command; returns `false` when the user asked to quit
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> std::io::Result<bool> {
        debug!(?command, "Executing command");

        match command {
            Command::Play => self.session.on_play(),
            Command::Pause => self.session.on_pause(),
            Command::Toggle => self.session.on_play_pause(),
            Command::Next => self.session.on_next(),
            Command::Prev => self.session.on_prev(),
            Command::Seek(seconds) => self.session.on_seek(seconds),
            Command::Select(index) => {
                if let Err(e) = self.session.on_select(index) {
                    writeln!(out, "Error: {}", e)?;
                }
            }
            Command::Move { from, to } => {
                if let Err(e) = self.session.on_reorder(from, to) {
                    writeln!(out, "Error: {}", e)?;
                }
            }
            Command::Rain => self.session.on_toggle_ambient(),
            Command::Volume(level) => self.session.on_volume(level),
            Command::Mute => self.session.on_toggle_mute(),
            Command::List => write_track_list(&self.session, out)?,
            Command::Status => writeln!(out, "{}", status_line(&self.session))?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }

        self.flush_events(out)?;
        Ok(true)
    }

    /// Print every queued session event worth showing
    pub fn flush_events<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        for event in self.session.drain_events() {
            if let Some(line) = render_event(&event, &self.session) {
                writeln!(out, "{}", line)?;
            }
        }
        Ok(())
    }
}

/// Interleave stdin commands with media clock ticks until `quit` or EOF
pub async fn run<R, W>(
    terminal: &mut Terminal,
    input: R,
    out: &mut W,
    tick: Duration,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately
    interval.tick().await;

    terminal.flush_events(out)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        if !terminal.execute(command, out)? {
                            break;
                        }
                    }
                    Err(e) => writeln!(out, "{} (type `help`)", e)?,
                }
            }
            _ = interval.tick() => {
                terminal.advance(tick);
                terminal.flush_events(out)?;
            }
        }
        out.flush()?;
    }

    info!("Player stopped");
    Ok(())
}

pub fn render_event(event: &PlayerEvent, session: &TerminalSession) -> Option<String> {
    match event {
        PlayerEvent::TracksReplaced { length } => Some(format!("Loaded {} tracks", length)),
        PlayerEvent::SelectionChanged {
            index: Some(index),
            track_id: Some(id),
            ..
        } => find_track(session, *id).map(|t| format!("Now: [{}] {}", index, t.display_name())),
        PlayerEvent::SelectionChanged { .. } => Some("No track selected".to_string()),
        PlayerEvent::TrackReordered { from, to, .. } => {
            Some(format!("Swapped tracks {} and {}", from, to))
        }
        PlayerEvent::StateChanged { state } => Some(state_label(*state).to_string()),
        PlayerEvent::VolumeChanged { level, is_muted } => Some(if *is_muted {
            format!("Volume {}% (muted)", level)
        } else {
            format!("Volume {}%", level)
        }),
        PlayerEvent::AmbientChanged { is_on } => {
            Some(if *is_on { "Rain on" } else { "Rain off" }.to_string())
        }
        PlayerEvent::Error { message } => Some(format!("Error: {}", message)),
        // Failures are reported through the accompanying Error event
        PlayerEvent::LoadStateChanged { .. } | PlayerEvent::PositionUpdate { .. } => None,
    }
}

pub fn status_line(session: &TerminalSession) -> String {
    match session.load_state() {
        LoadState::Loading => return "Loading tracks...".to_string(),
        LoadState::Failed { message } => return format!("No tracks ({})", message),
        LoadState::Ready => {}
    }

    let playback = session.playback_state();
    let track = match (session.selection(), session.current_track()) {
        (Some(index), Some(track)) => format!("[{}] {}", index, track.display_name()),
        _ => "no track".to_string(),
    };

    format!(
        "{} {}/{} ({:.0}%) {} | rain {} | volume {}%{}",
        state_label(playback.state),
        format_time(playback.current_time),
        format_time(playback.duration),
        playback.progress() * 100.0,
        track,
        if session.ambient_state().is_on { "on" } else { "off" },
        session.volume(),
        if session.is_muted() { " (muted)" } else { "" },
    )
}

fn write_track_list<W: Write>(session: &TerminalSession, out: &mut W) -> std::io::Result<()> {
    if session.tracks().is_empty() {
        return writeln!(out, "No tracks");
    }
    for (index, track) in session.tracks().iter().enumerate() {
        let marker = if session.selection() == Some(index) { '>' } else { ' ' };
        writeln!(
            out,
            "{} {:>2}. {} ({})",
            marker,
            index,
            track.display_name(),
            format_time(track.duration().as_secs_f64())
        )?;
    }
    Ok(())
}

fn find_track(session: &TerminalSession, id: u64) -> Option<&Track> {
    session.tracks().iter().find(|t| t.id == id)
}

fn state_label(state: PlayState) -> &'static str {
    match state {
        PlayState::Paused => "Paused",
        PlayState::Playing => "Playing",
    }
}

/// `m:ss`, for non-negative finite seconds
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
