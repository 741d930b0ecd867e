//! LRCLIB API Data Transfer Objects
//!
//! API Reference: https://lrclib.net/docs
//!
//! `GET /api/get` answers 200 with a lyrics record, or 404 with
//! `{"code": 404, "name": "TrackNotFound", "message": "..."}`.

use serde::{Deserialize, Serialize};

/// A lyrics record
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsResponse {
    pub id: Option<i64>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    /// Seconds
    pub duration: Option<f64>,
    #[serde(default)]
    pub instrumental: bool,
    /// Lyrics without timing tags
    pub plain_lyrics: Option<String>,
    /// LRC format with `[mm:ss.xx]` tags
    pub synced_lyrics: Option<String>,
}
