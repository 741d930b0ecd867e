//! Internal domain models for track enrichment.
//!
//! These types are OUR types - they don't change when Last.fm, LRCLIB or
//! YouTube change their responses. Everything coming off the wire is
//! converted into these via the per-provider adapters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The (artist, track, optional album) tuple used for lookups.
///
/// Supplied by the caller (usually from Last.fm's recent tracks) and never
/// validated. Comparison is purely textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackIdentity {
    pub artist: String,
    pub track: String,
    pub album: Option<String>,
}

impl TrackIdentity {
    pub fn new(artist: impl Into<String>, track: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            track: track.into(),
            album: None,
        }
    }

    /// Attach an album. Empty strings are stored as no album, since Last.fm
    /// reports unknown albums as `""`.
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        let album = album.into();
        self.album = (!album.is_empty()).then_some(album);
        self
    }

    /// Cache key for this identity.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::derive(&self.artist, &self.track)
    }
}

/// Key into the enrichment store: `"<artist> - <track>"`.
///
/// No case folding or trimming: two identities share a key only if their
/// artist and track text are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn derive(artist: &str, track: &str) -> Self {
        Self(format!("{artist} - {track}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&TrackIdentity> for CacheKey {
    fn from(identity: &TrackIdentity) -> Self {
        identity.cache_key()
    }
}

impl From<&str> for CacheKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the three enrichment slots of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnrichmentField {
    AlbumArt,
    YouTube,
    Lyrics,
}

impl EnrichmentField {
    pub const ALL: [EnrichmentField; 3] = [Self::AlbumArt, Self::YouTube, Self::Lyrics];

    /// Name used in the persisted JSON document.
    pub fn key(self) -> &'static str {
        match self {
            Self::AlbumArt => "album_art",
            Self::YouTube => "youtube",
            Self::Lyrics => "lyrics",
        }
    }
}

impl fmt::Display for EnrichmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Supplementary data attached to a track.
///
/// A field that is `None` (or holds an empty string) is "not yet resolved"
/// and will be looked up again on the next enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
}

impl EnrichmentRecord {
    pub fn get(&self, field: EnrichmentField) -> Option<&str> {
        let value = match field {
            EnrichmentField::AlbumArt => &self.album_art,
            EnrichmentField::YouTube => &self.youtube,
            EnrichmentField::Lyrics => &self.lyrics,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, field: EnrichmentField, value: impl Into<String>) {
        let slot = match field {
            EnrichmentField::AlbumArt => &mut self.album_art,
            EnrichmentField::YouTube => &mut self.youtube,
            EnrichmentField::Lyrics => &mut self.lyrics,
        };
        *slot = Some(value.into());
    }

    pub fn is_resolved(&self, field: EnrichmentField) -> bool {
        self.get(field).is_some()
    }

    /// Fields that still need a lookup.
    pub fn missing(&self) -> Vec<EnrichmentField> {
        EnrichmentField::ALL
            .into_iter()
            .filter(|f| !self.is_resolved(*f))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.missing().len() == EnrichmentField::ALL.len()
    }

    /// Fill unresolved fields from `other`, keeping what we already have.
    /// Returns the fields that changed.
    pub fn merge(&mut self, other: &EnrichmentRecord) -> Vec<EnrichmentField> {
        let mut changed = Vec::new();
        for field in EnrichmentField::ALL {
            if !self.is_resolved(field)
                && let Some(value) = other.get(field)
            {
                self.set(field, value);
                changed.push(field);
            }
        }
        changed
    }
}

/// Errors that can occur while talking to enrichment providers
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No matches found")]
    NoMatches,

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("External tool failed: {0}")]
    Tool(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_format() {
        let id = TrackIdentity::new("Boards of Canada", "Roygbiv");
        assert_eq!(id.cache_key().as_str(), "Boards of Canada - Roygbiv");
    }

    #[test]
    fn test_cache_key_ignores_album() {
        let a = TrackIdentity::new("Artist", "Song").with_album("One");
        let b = TrackIdentity::new("Artist", "Song").with_album("Two");
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_cache_key_is_case_sensitive() {
        let a = CacheKey::derive("Artist", "Song");
        let b = CacheKey::derive("artist", "song");
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_album_is_none() {
        let id = TrackIdentity::new("Artist", "Song").with_album("");
        assert_eq!(id.album, None);
    }

    #[test]
    fn test_record_merge_keeps_existing() {
        let mut record = EnrichmentRecord {
            album_art: Some("X".to_string()),
            ..Default::default()
        };
        let fetched = EnrichmentRecord {
            album_art: Some("ignored".to_string()),
            youtube: Some("Y".to_string()),
            ..Default::default()
        };

        let changed = record.merge(&fetched);

        assert_eq!(changed, vec![EnrichmentField::YouTube]);
        assert_eq!(record.album_art.as_deref(), Some("X"));
        assert_eq!(record.youtube.as_deref(), Some("Y"));
        assert_eq!(record.lyrics, None);
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let record = EnrichmentRecord {
            lyrics: Some(String::new()),
            ..Default::default()
        };
        assert!(!record.is_resolved(EnrichmentField::Lyrics));
        assert_eq!(record.missing().len(), 3);
        assert!(record.is_empty());
    }

    #[test]
    fn test_record_serializes_only_present_fields() {
        let record = EnrichmentRecord {
            youtube: Some("https://www.youtube.com/watch?v=abc".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"youtube":"https://www.youtube.com/watch?v=abc"}"#);
    }

    #[test]
    fn test_record_tolerates_null_and_unknown_fields() {
        let json = r#"{"album_art": null, "youtube": "Y", "extra": 1}"#;
        let record: EnrichmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.album_art, None);
        assert_eq!(record.youtube.as_deref(), Some("Y"));
    }
}
