//! Interactive commands read from stdin

use crate::error::{AppError, Result};
use std::str::FromStr;

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Toggle,
    Next,
    Prev,
    Seek(f64),
    Select(usize),
    Move { from: usize, to: usize },
    Rain,
    Volume(u8),
    Mute,
    List,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  play | pause | toggle     control playback
  next | prev               skip (wraps around)
  seek <seconds>            jump within the current track
  select <index>            play track at index
  move <from> <to>          swap two tracks
  rain                      toggle ambient rain
  volume <0-100>            set volume
  mute                      toggle mute
  list | status             show tracks / playback state
  quit                      exit";

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(AppError::UnknownCommand(String::new()));
        };
        let args: Vec<&str> = parts.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "play" => Command::Play,
            "pause" => Command::Pause,
            "toggle" | "p" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Prev,
            "seek" => Command::Seek(parse_arg("seek", &args, 0)?),
            "select" | "s" => Command::Select(parse_arg("select", &args, 0)?),
            "move" => Command::Move {
                from: parse_arg("move", &args, 0)?,
                to: parse_arg("move", &args, 1)?,
            },
            "rain" => Command::Rain,
            "volume" | "vol" => Command::Volume(parse_volume(&args)?),
            "mute" => Command::Mute,
            "list" | "ls" => Command::List,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(AppError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

fn parse_arg<T: FromStr>(command: &'static str, args: &[&str], position: usize) -> Result<T> {
    let raw = args.get(position).ok_or_else(|| AppError::InvalidArgument {
        command,
        message: format!("missing argument {}", position + 1),
    })?;

    raw.parse().map_err(|_| AppError::InvalidArgument {
        command,
        message: format!("cannot parse '{}'", raw),
    })
}

fn parse_volume(args: &[&str]) -> Result<u8> {
    let level: u8 = parse_arg("volume", args, 0)?;
    if level > 100 {
        return Err(AppError::InvalidArgument {
            command: "volume",
            message: format!("{} is above 100", level),
        });
    }
    Ok(level)
}
