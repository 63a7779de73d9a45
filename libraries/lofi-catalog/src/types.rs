//! Catalog configuration and wire types for the Deezer search API.

use crate::error::{CatalogError, Result};
use lofi_core::{dedupe_by_id, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default catalog endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.deezer.com";

/// Default search query
pub const DEFAULT_QUERY: &str = "lofi";

/// CORS proxy prefix used by browser builds
pub const CORS_PROXY: &str = "https://corsproxy.io/?";

/// Configuration for the catalog client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog API (e.g., "https://api.deezer.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Search query sent as `q`
    #[serde(default = "default_query")]
    pub query: String,

    /// Optional proxy prefix; the full request URL is percent-encoded and
    /// appended to it
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CatalogConfig {
    /// Config pointing at a specific base URL, other fields default.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Route requests through a proxy prefix.
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Use a different search query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            query: default_query(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

// =============================================================================
// Wire Types
// =============================================================================

/// Body of `GET /search`.
///
/// Deezer reports API-level failures with HTTP 200 and an `error` object
/// instead of `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub data: Option<Vec<DeezerTrack>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A track record as returned by the search endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DeezerTrack {
    pub id: u64,
    pub title: String,
    pub artist: DeezerArtist,
    pub album: DeezerAlbum,
    pub preview: String,
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeezerArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeezerAlbum {
    pub title: String,
    pub cover_medium: String,
}

impl From<DeezerTrack> for Track {
    fn from(raw: DeezerTrack) -> Self {
        Track {
            id: raw.id,
            title: raw.title,
            artist: raw.artist.name,
            album: raw.album.title,
            cover_url: raw.album.cover_medium,
            preview_url: raw.preview,
            duration_seconds: raw.duration,
        }
    }
}

/// Normalize a search response body into at most `limit` tracks.
///
/// Any record that does not have the expected shape rejects the whole body.
/// Duplicate ids are dropped before truncation.
pub fn parse_search_response(body: &[u8], limit: usize) -> Result<Vec<Track>> {
    let response: SearchResponse = serde_json::from_slice(body)
        .map_err(|e| CatalogError::Parse(format!("Invalid search response: {}", e)))?;

    let Some(records) = response.data else {
        let message = match response.error {
            Some(ApiError { kind, message }) => format!(
                "{}: {}",
                kind.unwrap_or_else(|| "Error".to_string()),
                message.unwrap_or_default()
            ),
            None => "Response has no data list".to_string(),
        };
        return Err(CatalogError::Parse(message));
    };

    let mut tracks: Vec<Track> = records.into_iter().map(Track::from).collect();
    let dropped = dedupe_by_id(&mut tracks);
    if dropped > 0 {
        tracing::debug!(dropped, "Dropped tracks with duplicate ids");
    }
    tracks.truncate(limit);

    Ok(tracks)
}
