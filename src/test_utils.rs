//! Test utilities and fixtures for lastfm-lens tests.
//!
//! This module provides common test helpers, mock factories, and
//! cache store utilities to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use lastfm_lens::test_utils::{temp_store, boards_of_canada};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (store, _dir) = temp_store();
//!     let id = boards_of_canada();
//!     // ... test logic
//! }
//! ```

use tempfile::TempDir;

use crate::enrichment::{EnrichmentRecord, EnrichmentStore, TrackIdentity};
use crate::lastfm::RecentTrack;

/// Creates an empty cache store in a temporary directory.
///
/// The cache file does not exist yet; the first write creates it.
/// Keep the TempDir alive for the duration of your test.
///
/// ```ignore
/// let (store, _dir) = temp_store();
/// // Cache file is deleted when _dir goes out of scope
/// ```
pub fn temp_store() -> (EnrichmentStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let store = EnrichmentStore::new(dir.path().join("cache.json"));
    (store, dir)
}

/// Creates a cache store whose file already holds `entries`.
pub async fn seeded_store(entries: &[(TrackIdentity, EnrichmentRecord)]) -> (EnrichmentStore, TempDir) {
    let (store, dir) = temp_store();
    for (identity, record) in entries {
        store
            .set(identity.cache_key(), record.clone())
            .await
            .expect("Failed to seed store");
    }
    (store, dir)
}

/// A track with a known album.
pub fn boards_of_canada() -> TrackIdentity {
    TrackIdentity::new("Boards of Canada", "Roygbiv").with_album("Music Has the Right to Children")
}

/// A record with all three fields resolved.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let partial = EnrichmentRecord { lyrics: None, ..full_record() };
/// ```
pub fn full_record() -> EnrichmentRecord {
    EnrichmentRecord {
        album_art: Some("https://lastfm.freetls.fastly.net/i/u/_/roygbiv.png".to_string()),
        youtube: Some("https://www.youtube.com/watch?v=yT0gRc2Hy6A".to_string()),
        lyrics: Some("(instrumental)".to_string()),
    }
}

/// Creates a mock scrobble with the given position in the history.
pub fn mock_recent_track(n: u32) -> RecentTrack {
    RecentTrack {
        name: format!("Track {}", n),
        artist: "Test Artist".to_string(),
        album: Some("Test Album".to_string()),
        url: format!("https://www.last.fm/music/Test+Artist/_/Track+{}", n),
        now_playing: false,
        played_at: Some(1_700_000_000 + u64::from(n) * 60),
        played_at_text: Some("14 Nov 2023, 22:13".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_store_starts_empty() {
        let (store, dir) = temp_store();

        assert!(store.is_empty().await);
        assert!(!dir.path().join("cache.json").exists());
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let (store, dir) = seeded_store(&[(boards_of_canada(), full_record())]).await;

        assert_eq!(store.len().await, 1);
        assert!(dir.path().join("cache.json").exists());
        assert_eq!(
            store.get(&boards_of_canada().cache_key()).await,
            Some(full_record())
        );
    }

    #[test]
    fn test_full_record_is_complete() {
        assert!(full_record().missing().is_empty());
    }

    #[test]
    fn test_mock_recent_track() {
        let track = mock_recent_track(3);
        assert_eq!(track.name, "Track 3");
        assert!(!track.now_playing);
    }
}
