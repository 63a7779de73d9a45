//! Ordered track list with a wrapping selection cursor
//!
//! Unlike a play queue, nothing is consumed: `next`/`previous` only move the
//! selection, and the list is cyclic.

use crate::error::{PlaybackError, Result};
use lofi_core::Track;

/// Track list store
///
/// Structure:
/// ```text
///   0  Track A
/// > 1  Track B   <- selection
///   2  Track C
/// ```
///
/// Invariant: `selection` is `Some(i)` with `i < tracks.len()` whenever the
/// list is non-empty, and `None` only for an empty list.
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    tracks: Vec<Track>,
    selection: Option<usize>,
}

impl TrackList {
    /// Create new empty track list
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all tracks and select the first one
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.selection = if tracks.is_empty() { None } else { Some(0) };
        self.tracks = tracks;
    }

    /// Select track at `index`
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.selection = Some(index);
        Ok(())
    }

    /// Move selection forward, wrapping to the first track
    ///
    /// No-op on an empty list. Returns the resulting selection.
    pub fn next(&mut self) -> Option<usize> {
        let len = self.tracks.len();
        if let Some(current) = self.selection {
            self.selection = Some((current + 1) % len);
        }
        self.selection
    }

    /// Move selection backward, wrapping to the last track
    ///
    /// No-op on an empty list. Returns the resulting selection.
    pub fn previous(&mut self) -> Option<usize> {
        let len = self.tracks.len();
        if let Some(current) = self.selection {
            self.selection = Some((current + len - 1) % len);
        }
        self.selection
    }

    /// Swap tracks at `from` and `to`
    ///
    /// The selection keeps pointing at the same track.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;

        if from == to {
            return Ok(());
        }

        self.tracks.swap(from, to);

        self.selection = match self.selection {
            Some(sel) if sel == from => Some(to),
            Some(sel) if sel == to => Some(from),
            other => other,
        };

        Ok(())
    }

    /// All tracks in display/playback order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Selected index (`None` for an empty list)
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Selected track
    pub fn current(&self) -> Option<&Track> {
        self.selection.and_then(|index| self.tracks.get(index))
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tracks.len() {
            Ok(())
        } else {
            Err(PlaybackError::OutOfRange {
                index,
                len: self.tracks.len(),
            })
        }
    }
}
