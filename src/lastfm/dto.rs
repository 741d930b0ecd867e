//! Last.fm API Data Transfer Objects
//!
//! These types match what `ws.audioscrobbler.com/2.0/?format=json` returns.
//! DO NOT use these types outside the lastfm module - convert via the adapter.
//!
//! API quirks handled here:
//! - Text content lives under `#text`, metadata under `@attr`
//! - Counts arrive as strings (`"playcount": "42"`), sometimes as numbers
//! - A list with one element may be sent as a bare object
//! - Errors come back as `{"error": <code>, "message": "..."}`, often with HTTP 200
//!
//! Example (`user.getrecenttracks`):
//! ```json
//! {
//!   "recenttracks": {
//!     "track": [{
//!       "name": "Roygbiv",
//!       "artist": {"#text": "Boards of Canada"},
//!       "album": {"#text": "Music Has the Right to Children"},
//!       "image": [{"size": "small", "#text": "https://.../34s/abc.png"}],
//!       "@attr": {"nowplaying": "true"}
//!     }],
//!     "@attr": {"total": "12345"}
//!   }
//! }
//! ```

use serde::{Deserialize, Deserializer};

/// Error body returned by every method on failure
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: i64,
    #[serde(default)]
    pub message: String,
}

/// A list that Last.fm may collapse to a single object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// `{"#text": "..."}` wrapper used for artist/album names in track lists
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextField {
    #[serde(rename = "#text", default)]
    pub text: String,
}

/// `{"name": "..."}` artist reference used in top lists and track info
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedArtist {
    #[serde(default)]
    pub name: String,
}

/// One size variant of an image. Variants are listed smallest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    #[serde(rename = "#text", default)]
    pub url: String,
    #[serde(default)]
    pub size: String,
}

// ============================================================================
// user.getrecenttracks
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracksResponse {
    pub recenttracks: RecentTracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracks {
    #[serde(default)]
    pub track: OneOrMany<RecentTrack>,
    #[serde(rename = "@attr", default)]
    pub attr: Option<PageAttr>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageAttr {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTrack {
    pub name: String,
    #[serde(default)]
    pub artist: TextField,
    #[serde(default)]
    pub album: TextField,
    #[serde(default)]
    pub image: Vec<Image>,
    #[serde(default)]
    pub url: String,
    /// Present only on the track currently playing
    #[serde(rename = "@attr", default)]
    pub attr: Option<NowPlayingAttr>,
    /// Absent on the track currently playing
    #[serde(default)]
    pub date: Option<DateField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NowPlayingAttr {
    #[serde(default)]
    pub nowplaying: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateField {
    #[serde(default, deserialize_with = "lenient_count")]
    pub uts: u64,
    /// Human-readable, e.g. `"03 Feb 2025, 10:00"`
    #[serde(rename = "#text", default)]
    pub text: String,
}

// ============================================================================
// album.getinfo / track.getInfo
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumInfoResponse {
    pub album: AlbumInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackInfoResponse {
    pub track: TrackInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackInfo {
    #[serde(default)]
    pub name: String,
    /// Only present when a `username` parameter was sent
    #[serde(default, deserialize_with = "lenient_count")]
    pub userplaycount: u64,
    /// Milliseconds, `"0"` when unknown
    #[serde(default, deserialize_with = "lenient_count")]
    pub duration: u64,
    #[serde(default)]
    pub album: Option<AlbumInfo>,
}

// ============================================================================
// user.getinfo
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    pub user: UserInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: Vec<Image>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub playcount: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub artist_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub album_count: u64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub registered: Option<Registered>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registered {
    #[serde(default, deserialize_with = "lenient_count")]
    pub unixtime: u64,
}

// ============================================================================
// user.gettopartists / user.gettopalbums / user.gettoptracks
// ============================================================================

/// The three top-list methods share a shape; only the key names differ.
#[derive(Debug, Clone, Deserialize)]
pub struct TopItemsResponse {
    #[serde(rename = "topartists", alias = "topalbums", alias = "toptracks")]
    pub list: TopList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopList {
    #[serde(rename = "artist", alias = "album", alias = "track", default)]
    pub items: OneOrMany<TopItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopItem {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub playcount: u64,
    /// Absent for top artists
    #[serde(default)]
    pub artist: Option<NamedArtist>,
    #[serde(default)]
    pub image: Vec<Image>,
    #[serde(default)]
    pub url: String,
}

// ============================================================================
// user.getweeklytrackchart
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyTrackChartResponse {
    pub weeklytrackchart: WeeklyTrackChart,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeeklyTrackChart {
    #[serde(default)]
    pub track: OneOrMany<ChartTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartTrack {
    pub name: String,
    #[serde(default)]
    pub artist: TextField,
    #[serde(default, deserialize_with = "lenient_count")]
    pub playcount: u64,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "@attr", default)]
    pub attr: Option<RankAttr>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankAttr {
    #[serde(default, deserialize_with = "lenient_count")]
    pub rank: u64,
}

/// Accept `42`, `"42"`, `""` or `null`; anything unparsable becomes 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_u64().unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
