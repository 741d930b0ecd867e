//! YouTube video search via yt-dlp
//!
//! Shells out to the `yt-dlp` command-line tool in flat-extraction mode, so
//! only the search result metadata is fetched and nothing is downloaded.
//!
//! Install yt-dlp:
//! - Windows: `winget install yt-dlp`
//! - macOS: `brew install yt-dlp`
//! - Linux: `pipx install yt-dlp` or the distribution package

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::enrichment::domain::EnrichmentError;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Extra time yt-dlp gets beyond its own socket timeout before we give up on it.
const PROCESS_GRACE: Duration = Duration::from_secs(10);

/// Searches YouTube for a track's video.
#[derive(Debug, Clone)]
pub struct YouTubeSearch {
    ytdlp_path: PathBuf,
    socket_timeout: Duration,
    grace: Duration,
}

impl YouTubeSearch {
    pub fn new(ytdlp_path: impl Into<PathBuf>, socket_timeout: Duration) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
            socket_timeout,
            grace: PROCESS_GRACE,
        }
    }

    #[cfg(test)]
    fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Watch URL of the first hit, trying each query in [`search_queries`] order.
    ///
    /// A failing query is logged and the next one is tried. The error of the
    /// last failure is returned only when no query produced a result and at
    /// least one of them failed.
    pub async fn find_video(
        &self,
        track: &str,
        artist: &str,
    ) -> Result<Option<String>, EnrichmentError> {
        let mut last_error = None;

        for query in search_queries(track, artist) {
            match self.search(&query).await {
                Ok(Some(id)) => return Ok(Some(watch_url(&id))),
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!("yt-dlp query {query:?} failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }

    /// Video id of the top hit for one query.
    ///
    /// yt-dlp is killed if it outlives its socket timeout plus the grace period.
    async fn search(&self, query: &str) -> Result<Option<String>, EnrichmentError> {
        let mut command = tokio::process::Command::new(&self.ytdlp_path);
        command
            .arg("-J")
            .arg("--flat-playlist")
            .arg("--no-warnings")
            .arg("--socket-timeout")
            .arg(self.socket_timeout.as_secs().max(1).to_string())
            .arg(format!("ytsearch1:{query}"))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.socket_timeout + self.grace, command.output())
            .await
            .map_err(|_| EnrichmentError::Tool("yt-dlp timed out".to_string()))?
            .map_err(|e| EnrichmentError::Tool(format!("Failed to run yt-dlp: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EnrichmentError::Tool(format!(
                "yt-dlp failed: {}",
                stderr.trim()
            )));
        }

        parse_search_json(&String::from_utf8_lossy(&output.stdout))
    }

    /// Check if the configured yt-dlp binary runs
    pub fn is_available(&self) -> bool {
        self.version().is_some()
    }

    /// yt-dlp version string (for diagnostics)
    pub fn version(&self) -> Option<String> {
        Command::new(&self.ytdlp_path)
            .arg("--version")
            .output()
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
    }
}

/// Queries in priority order. Auto-generated "Topic" uploads are the cleanest
/// match for album tracks, then official audio, then anything.
pub fn search_queries(track: &str, artist: &str) -> [String; 3] {
    [
        format!("{track} {artist} topic"),
        format!("{track} {artist} official audio"),
        format!("{track} {artist}"),
    ]
}

pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL}{video_id}")
}

/// Parse the playlist JSON yt-dlp prints for a search.
fn parse_search_json(json: &str) -> Result<Option<String>, EnrichmentError> {
    let parsed: SearchOutput = serde_json::from_str(json)
        .map_err(|e| EnrichmentError::Parse(format!("Failed to parse yt-dlp output: {e}")))?;

    Ok(parsed
        .entries
        .into_iter()
        .filter_map(|entry| entry.id)
        .find(|id| !id.is_empty()))
}

/// yt-dlp `-J` output for a search playlist
#[derive(serde::Deserialize)]
struct SearchOutput {
    #[serde(default)]
    entries: Vec<SearchEntry>,
}

#[derive(serde::Deserialize)]
struct SearchEntry {
    id: Option<String>,
}
