//! Trait definitions for enrichment sources.
//!
//! These traits are the seam between the pipeline and the upstream clients.
//! Each source answers with `Option<String>`: not-found, network failures and
//! malformed responses all collapse to `None` here, so nothing a provider
//! does can fail an enrichment.
//!
//! # Example
//!
//! ```ignore
//! use lastfm_lens::enrichment::traits::LyricsSource;
//!
//! async fn show<L: LyricsSource>(source: &L) {
//!     if let Some(text) = source.find_lyrics("Roygbiv", "Boards of Canada").await {
//!         println!("{text}");
//!     }
//! }
//! ```

use async_trait::async_trait;

use super::lrclib::LrclibClient;
use super::youtube::YouTubeSearch;
use crate::lastfm::LastFmClient;

/// Album artwork lookup.
#[async_trait]
pub trait AlbumArtSource: Send + Sync {
    /// Artwork URL for an album.
    async fn album_image(&self, artist: &str, album: &str) -> Option<String>;

    /// Artwork URL via the track's album, used when the album lookup fails.
    async fn track_image(&self, artist: &str, track: &str) -> Option<String>;
}

/// Video link lookup.
#[async_trait]
pub trait VideoLinkSource: Send + Sync {
    /// Canonical watch URL of the best match.
    async fn find_video(&self, track: &str, artist: &str) -> Option<String>;
}

/// Plain-text lyrics lookup.
#[async_trait]
pub trait LyricsSource: Send + Sync {
    async fn find_lyrics(&self, track: &str, artist: &str) -> Option<String>;
}

// Implement traits for real clients

#[async_trait]
impl AlbumArtSource for LastFmClient {
    async fn album_image(&self, artist: &str, album: &str) -> Option<String> {
        self.album_image(artist, album)
            .await
            .inspect_err(|e| tracing::debug!("Album art lookup failed for {artist} / {album}: {e}"))
            .ok()
            .flatten()
    }

    async fn track_image(&self, artist: &str, track: &str) -> Option<String> {
        self.track_image(artist, track)
            .await
            .inspect_err(|e| tracing::debug!("Track art lookup failed for {artist} / {track}: {e}"))
            .ok()
            .flatten()
    }
}

#[async_trait]
impl VideoLinkSource for YouTubeSearch {
    async fn find_video(&self, track: &str, artist: &str) -> Option<String> {
        self.find_video(track, artist)
            .await
            .inspect_err(|e| tracing::debug!("YouTube search failed for {track} / {artist}: {e}"))
            .ok()
            .flatten()
    }
}

#[async_trait]
impl LyricsSource for LrclibClient {
    async fn find_lyrics(&self, track: &str, artist: &str) -> Option<String> {
        self.get_lyrics(track, artist)
            .await
            .inspect_err(|e| tracing::debug!("Lyrics lookup failed for {track} / {artist}: {e}"))
            .ok()
            .flatten()
    }
}
