//! WASM bindings for lofi-playback
//!
//! Wraps the player session around two browser `<audio>` elements so the
//! core can drive a web page directly.

pub mod output;
pub mod player;

pub use output::HtmlAudioOutput;
pub use player::WasmPlayer;
