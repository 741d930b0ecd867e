//! LRCLIB HTTP client
//!
//! Fetches plain lyrics from lrclib.net. No API key required.

use super::dto;
use crate::enrichment::domain::EnrichmentError;

/// LRCLIB client
pub struct LrclibClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            base_url: "https://lrclib.net".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Plain lyrics for a track, `None` when LRCLIB has none (or it's instrumental).
    pub async fn get_lyrics(
        &self,
        track: &str,
        artist: &str,
    ) -> Result<Option<String>, EnrichmentError> {
        match self.lookup(track, artist).await {
            Ok(record) => Ok(record.plain_lyrics.filter(|l| !l.trim().is_empty())),
            Err(EnrichmentError::NoMatches) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Full lyrics record for a track.
    pub async fn lookup(
        &self,
        track: &str,
        artist: &str,
    ) -> Result<dto::LyricsResponse, EnrichmentError> {
        let url = format!("{}/api/get", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("track_name", track), ("artist_name", artist)])
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EnrichmentError::NoMatches);
        }

        if !status.is_success() {
            return Err(EnrichmentError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::LyricsResponse>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = LrclibClient::new(reqwest::Client::new());
        assert_eq!(client.base_url, "https://lrclib.net");
    }

    #[tokio::test]
    async fn test_get_lyrics_returns_plain_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get"))
            .and(query_param("track_name", "Windowlicker"))
            .and(query_param("artist_name", "Aphex Twin"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"id": 7, "instrumental": false,
                    "plainLyrics": "line one\nline two",
                    "syncedLyrics": "[00:01.00] line one"}"#,
            ))
            .mount(&server)
            .await;

        let client = LrclibClient::with_base_url(server.uri());
        let lyrics = client.get_lyrics("Windowlicker", "Aphex Twin").await.unwrap();

        assert_eq!(lyrics.as_deref(), Some("line one\nline two"));
    }

    #[tokio::test]
    async fn test_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(
                r#"{"code": 404, "name": "TrackNotFound", "message": "Failed to find specified track"}"#,
            ))
            .mount(&server)
            .await;

        let client = LrclibClient::with_base_url(server.uri());

        assert_eq!(client.get_lyrics("Nope", "Nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = LrclibClient::with_base_url(server.uri());

        assert!(matches!(
            client.get_lyrics("A", "B").await,
            Err(EnrichmentError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_instrumental_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"id": 1, "instrumental": true, "plainLyrics": null}"#,
            ))
            .mount(&server)
            .await;

        let client = LrclibClient::with_base_url(server.uri());

        assert_eq!(client.get_lyrics("Roygbiv", "Boards of Canada").await.unwrap(), None);
    }
}
