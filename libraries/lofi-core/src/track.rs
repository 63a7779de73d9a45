/// Track domain type
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Catalog identifier of a track
pub type TrackId = u64;

/// Playable audio item
///
/// Immutable once created by the catalog adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identifier, unique within a track list
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album title
    pub album: String,

    /// Album cover image URL
    pub cover_url: String,

    /// Preview audio URL loaded into the output handle
    pub preview_url: String,

    /// Duration reported by the catalog, in seconds
    pub duration_seconds: f64,
}

impl Track {
    /// "Artist - Title", as shown in the track list
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }

    /// Catalog duration as a `Duration`
    ///
    /// Negative or non-finite catalog values map to zero.
    pub fn duration(&self) -> Duration {
        if self.duration_seconds.is_finite() && self.duration_seconds > 0.0 {
            Duration::from_secs_f64(self.duration_seconds)
        } else {
            Duration::ZERO
        }
    }
}

/// Drop tracks whose id was already seen, keeping the first occurrence
///
/// Returns the number of dropped tracks.
pub fn dedupe_by_id(tracks: &mut Vec<Track>) -> usize {
    let before = tracks.len();
    let mut seen = HashSet::with_capacity(before);
    tracks.retain(|track| seen.insert(track.id));
    before - tracks.len()
}
