//! Lofi Player Core
//!
//! The track model shared by the catalog adapter, the playback core and the
//! hosts that drive them.
//!
//! # Example
//!
//! ```rust
//! use lofi_core::Track;
//!
//! let track = Track {
//!     id: 1,
//!     title: "Rainy Window".to_string(),
//!     artist: "Lofi Girl".to_string(),
//!     album: "Study Beats".to_string(),
//!     cover_url: "https://cdn.example.com/cover.jpg".to_string(),
//!     preview_url: "https://cdn.example.com/preview.mp3".to_string(),
//!     duration_seconds: 30.0,
//! };
//!
//! assert_eq!(track.display_name(), "Lofi Girl - Rainy Window");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod track;

pub use track::{dedupe_by_id, Track, TrackId};
