//! Scrobbles-per-day line chart, rendered by QuickChart.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use crate::lastfm::RecentTrack;

const QUICKCHART_URL: &str = "https://quickchart.io/chart?c=";

/// Last.fm's display format for scrobble times, e.g. `"03 Feb 2025, 10:00"`.
const LASTFM_DATE_FORMAT: &str = "%d %b %Y, %H:%M";

pub const DEFAULT_TITLE: &str = "Listening History";

/// Scrobble count per calendar day. Tracks without a parsable date are skipped.
pub fn daily_counts(tracks: &[RecentTrack]) -> BTreeMap<NaiveDate, u32> {
    let mut counts = BTreeMap::new();
    for text in tracks.iter().filter_map(|t| t.played_at_text.as_deref()) {
        match NaiveDateTime::parse_from_str(text.trim(), LASTFM_DATE_FORMAT) {
            Ok(dt) => *counts.entry(dt.date()).or_insert(0) += 1,
            Err(e) => tracing::debug!("Skipping unparsable scrobble date {:?}: {}", text, e),
        }
    }
    counts
}

/// QuickChart URL for the chart, or `None` when no track has a usable date.
pub fn timeline_url(tracks: &[RecentTrack], title: &str) -> Option<String> {
    let counts = daily_counts(tracks);
    if counts.is_empty() {
        return None;
    }

    let labels: Vec<String> = counts
        .keys()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    let data: Vec<u32> = counts.values().copied().collect();

    let config = json!({
        "type": "line",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "Scrobbles",
                "data": data,
                "borderColor": "#ba0000",
                "fill": false
            }]
        },
        "options": {
            "title": {
                "display": true,
                "text": title
            }
        }
    });

    Some(format!(
        "{QUICKCHART_URL}{}",
        urlencoding::encode(&config.to_string())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_recent_track;

    fn at(text: Option<&str>) -> RecentTrack {
        RecentTrack {
            played_at_text: text.map(str::to_string),
            ..mock_recent_track(1)
        }
    }

    #[test]
    fn test_daily_counts_buckets_by_day() {
        let tracks = vec![
            at(Some("03 Feb 2025, 10:00")),
            at(Some("03 Feb 2025, 23:59")),
            at(Some("01 Feb 2025, 08:30")),
            at(None),
            at(Some("yesterday")),
        ];

        let counts = daily_counts(&tracks);

        let days: Vec<_> = counts.iter().map(|(d, n)| (d.to_string(), *n)).collect();
        assert_eq!(
            days,
            vec![("2025-02-01".to_string(), 1), ("2025-02-03".to_string(), 2)]
        );
    }

    #[test]
    fn test_timeline_url_encodes_chart_config() {
        let tracks = vec![at(Some("03 Feb 2025, 10:00")), at(Some("04 Feb 2025, 10:00"))];

        let url = timeline_url(&tracks, DEFAULT_TITLE).unwrap();

        let encoded = url.strip_prefix(QUICKCHART_URL).unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        let config: serde_json::Value = serde_json::from_str(&decoded).unwrap();

        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["labels"][1], "2025-02-04");
        assert_eq!(config["data"]["datasets"][0]["data"], json!([1, 1]));
        assert_eq!(config["data"]["datasets"][0]["borderColor"], "#ba0000");
        assert_eq!(config["options"]["title"]["text"], "Listening History");
        assert!(!encoded.contains(' '));
    }

    #[test]
    fn test_timeline_without_dates_is_none() {
        assert!(timeline_url(&[at(None)], DEFAULT_TITLE).is_none());
        assert!(timeline_url(&[], DEFAULT_TITLE).is_none());
    }
}
