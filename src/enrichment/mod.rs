//! Track enrichment - album art, video links and lyrics for a track, cached on disk.
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - Track identity, cache keys, enrichment records
//! - **Store** (`store.rs`) - Persistent JSON cache keyed by [`CacheKey`]
//! - **Sources** (`traits.rs`) - The seam between the pipeline and the providers
//! - **Providers** - `lrclib/` for lyrics, `youtube/` for video links; album
//!   art comes from [`crate::lastfm::LastFmClient`]
//! - **Pipeline** (`pipeline.rs`) - Cache-then-fetch orchestration
//!
//! # Usage
//!
//! ```ignore
//! use lastfm_lens::enrichment::{EnrichmentPipeline, EnrichmentStore, TrackIdentity};
//!
//! let pipeline = EnrichmentPipeline::new(store, lastfm, youtube, lrclib);
//! let record = pipeline
//!     .enrich(&TrackIdentity::new("Boards of Canada", "Roygbiv"))
//!     .await;
//! println!("{:?}", record.album_art);
//! ```

pub mod domain;
pub mod lrclib;
pub mod pipeline;
pub mod store;
pub mod traits;
pub mod youtube;

pub use domain::{CacheKey, EnrichmentError, EnrichmentField, EnrichmentRecord, TrackIdentity};
pub use lrclib::LrclibClient;
pub use pipeline::EnrichmentPipeline;
pub use store::{EnrichmentStore, StoreError};
pub use traits::{AlbumArtSource, LyricsSource, VideoLinkSource};
pub use youtube::YouTubeSearch;
