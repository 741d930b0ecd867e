//! Enrichment pipeline - read-through cache in front of the three sources.
//!
//! For a track identity:
//! 1. Derive the cache key and read the stored record
//! 2. Ask only the sources whose field is still missing
//! 3. Merge what came back and write the record once
//! 4. Return the merged record, however complete it is

use std::sync::Arc;

use crate::enrichment::{
    domain::{EnrichmentField, EnrichmentRecord, TrackIdentity},
    store::EnrichmentStore,
    traits::{AlbumArtSource, LyricsSource, VideoLinkSource},
};

/// Orchestrates store lookups and source calls for a track.
pub struct EnrichmentPipeline {
    store: Arc<EnrichmentStore>,
    album_art: Arc<dyn AlbumArtSource>,
    video: Arc<dyn VideoLinkSource>,
    lyrics: Arc<dyn LyricsSource>,
}

impl EnrichmentPipeline {
    pub fn new(
        store: Arc<EnrichmentStore>,
        album_art: Arc<dyn AlbumArtSource>,
        video: Arc<dyn VideoLinkSource>,
        lyrics: Arc<dyn LyricsSource>,
    ) -> Self {
        Self {
            store,
            album_art,
            video,
            lyrics,
        }
    }

    pub fn store(&self) -> &Arc<EnrichmentStore> {
        &self.store
    }

    /// Return the best available record for `identity`.
    ///
    /// Never fails: sources answer `None` on error and a failed cache write is
    /// logged, so the caller always gets something to render.
    pub async fn enrich(&self, identity: &TrackIdentity) -> EnrichmentRecord {
        let key = identity.cache_key();
        let mut record = self.store.get(&key).await.unwrap_or_default();

        let missing = record.missing();
        if missing.is_empty() {
            tracing::debug!(key = %key, "Enrichment served from cache");
            return record;
        }

        // The lookups don't share state, so the missing ones run together.
        let (album_art, youtube, lyrics) = tokio::join!(
            self.lookup(&missing, EnrichmentField::AlbumArt, self.resolve_album_art(identity)),
            self.lookup(
                &missing,
                EnrichmentField::YouTube,
                self.video.find_video(&identity.track, &identity.artist)
            ),
            self.lookup(
                &missing,
                EnrichmentField::Lyrics,
                self.lyrics.find_lyrics(&identity.track, &identity.artist)
            ),
        );

        let fetched = EnrichmentRecord {
            album_art,
            youtube,
            lyrics,
        };
        let changed = record.merge(&fetched);

        if changed.is_empty() {
            tracing::debug!(key = %key, missing = ?missing, "No new enrichment data");
            return record;
        }

        tracing::debug!(key = %key, fields = ?changed, "Caching new enrichment data");
        if let Err(e) = self.store.set(key, record.clone()).await {
            tracing::warn!("Failed to persist enrichment cache: {}", e);
        }

        record
    }

    /// Await `lookup` only if `field` is missing.
    async fn lookup<F>(&self, missing: &[EnrichmentField], field: EnrichmentField, lookup: F) -> Option<String>
    where
        F: Future<Output = Option<String>>,
    {
        if !missing.contains(&field) {
            return None;
        }
        lookup.await.filter(|value| !value.is_empty())
    }

    /// Album lookup first, then the track's album as a fallback.
    async fn resolve_album_art(&self, identity: &TrackIdentity) -> Option<String> {
        if let Some(album) = identity.album.as_deref()
            && let Some(url) = self.album_art.album_image(&identity.artist, album).await
            && !url.is_empty()
        {
            return Some(url);
        }
        self.album_art
            .track_image(&identity.artist, &identity.track)
            .await
    }
}
