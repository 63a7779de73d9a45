//! Lofi Player - terminal host
//!
//! Fetches a lofi catalog and plays it against a simulated media clock,
//! driven by commands typed on stdin.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod terminal;

pub use commands::Command;
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use terminal::Terminal;
