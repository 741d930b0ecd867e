//! Last.fm HTTP client
//!
//! Talks to the Last.fm web service (https://www.last.fm/api). All methods
//! are read-only calls authenticated by API key; the user-scoped ones use
//! the configured username.
//!
//! Every call goes to the same endpoint with a `method` query parameter. The
//! API reports most failures in the body rather than the status code, so the
//! body is checked for an error object before decoding.

use serde::de::DeserializeOwned;

use super::types::{
    ChartTrack, NowPlaying, Period, RecentTrack, TopCategory, TopItem, TrackStats, UserProfile,
};
use super::{adapter, dto};
use crate::enrichment::domain::EnrichmentError;

const BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Last.fm error codes we treat specially.
const ERROR_NOT_FOUND: i64 = 6;
const ERROR_RATE_LIMITED: i64 = 29;

/// Last.fm API client
pub struct LastFmClient {
    http_client: reqwest::Client,
    api_key: String,
    username: String,
    base_url: String,
}

impl LastFmClient {
    /// Create a client for `username`'s data.
    pub fn new(
        http_client: reqwest::Client,
        api_key: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            username: username.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: "test-key".to_string(),
            username: "test-user".to_string(),
            base_url: base_url.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The latest scrobble, with whether it is still playing.
    ///
    /// `Ok(None)` means the user has no scrobbles at all.
    pub async fn now_playing(&self) -> Result<Option<NowPlaying>, EnrichmentError> {
        let response: dto::RecentTracksResponse = self
            .call(
                "user.getrecenttracks",
                &[("user", self.username.as_str()), ("limit", "1")],
            )
            .await?;
        Ok(adapter::to_now_playing(response))
    }

    /// Largest album image, normalised to original size.
    pub async fn album_image(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<Option<String>, EnrichmentError> {
        let response: dto::AlbumInfoResponse = self
            .call("album.getinfo", &[("artist", artist), ("album", album)])
            .await?;
        Ok(adapter::best_hd_image(&response.album.image))
    }

    /// Largest image of the album a track belongs to, normalised to original size.
    pub async fn track_image(
        &self,
        artist: &str,
        track: &str,
    ) -> Result<Option<String>, EnrichmentError> {
        let response: dto::TrackInfoResponse = self
            .call("track.getInfo", &[("artist", artist), ("track", track)])
            .await?;
        Ok(response
            .track
            .album
            .and_then(|album| adapter::best_hd_image(&album.image)))
    }

    pub async fn user_info(&self) -> Result<UserProfile, EnrichmentError> {
        let response: dto::UserInfoResponse = self
            .call("user.getinfo", &[("user", self.username.as_str())])
            .await?;
        Ok(adapter::to_user_profile(response))
    }

    pub async fn recent_tracks(&self, limit: u32) -> Result<Vec<RecentTrack>, EnrichmentError> {
        let limit = limit.to_string();
        let response: dto::RecentTracksResponse = self
            .call(
                "user.getrecenttracks",
                &[("user", self.username.as_str()), ("limit", &limit)],
            )
            .await?;
        Ok(adapter::to_recent_tracks(response))
    }

    pub async fn top_items(
        &self,
        category: TopCategory,
        period: Period,
        limit: u32,
    ) -> Result<Vec<TopItem>, EnrichmentError> {
        let limit = limit.to_string();
        let response: dto::TopItemsResponse = self
            .call(
                category.method(),
                &[
                    ("user", self.username.as_str()),
                    ("period", period.as_param()),
                    ("limit", &limit),
                ],
            )
            .await?;
        Ok(adapter::to_top_items(response))
    }

    /// Track chart for the most recent week.
    pub async fn weekly_track_chart(&self) -> Result<Vec<ChartTrack>, EnrichmentError> {
        let response: dto::WeeklyTrackChartResponse = self
            .call("user.getweeklytrackchart", &[("user", self.username.as_str())])
            .await?;
        Ok(adapter::to_chart_tracks(response))
    }

    /// How often the user has scrobbled a track.
    pub async fn track_playcount(&self, artist: &str, track: &str) -> Result<u64, EnrichmentError> {
        Ok(self.track_stats(artist, track).await?.playcount)
    }

    /// The user's playcount and the track's length.
    pub async fn track_stats(&self, artist: &str, track: &str) -> Result<TrackStats, EnrichmentError> {
        let response: dto::TrackInfoResponse = self
            .call(
                "track.getInfo",
                &[
                    ("artist", artist),
                    ("track", track),
                    ("username", self.username.as_str()),
                ],
            )
            .await?;
        Ok(adapter::to_track_stats(&response.track))
    }

    /// Send one API call and decode the body.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, EnrichmentError> {
        let mut query = vec![
            ("method", method),
            ("api_key", self.api_key.as_str()),
            ("format", "json"),
        ];
        query.extend_from_slice(params);

        tracing::debug!(method, "Last.fm request");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        let body = response
            .text()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        if let Ok(error) = serde_json::from_str::<dto::ApiErrorBody>(&body) {
            return Err(match error.error {
                ERROR_NOT_FOUND => EnrichmentError::NoMatches,
                ERROR_RATE_LIMITED => EnrichmentError::RateLimited,
                code => EnrichmentError::ApiError(format!("{} (code {})", error.message, code)),
            });
        }

        if !status.is_success() {
            return Err(EnrichmentError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        serde_json::from_str(&body).map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}
