//! Adapter layer: Convert Last.fm DTOs to domain models
//!
//! This is the ONLY place where Last.fm DTO types are converted to our types.
//! Empty strings from the API become `None` here.

use std::sync::LazyLock;

use regex::Regex;

use super::dto;
use super::types::{ChartTrack, NowPlaying, RecentTrack, TopItem, TrackStats, UserProfile};
use crate::enrichment::TrackIdentity;

/// Size segment of a Last.fm CDN image path, e.g. `/i/u/300x300/` or `/i/u/174s/`.
static SIZE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/i/u/[^/]+/").expect("size segment pattern is valid"));

/// Rewrite a Last.fm image URL to point at the original upload.
///
/// `.../i/u/300x300/abc.jpg` becomes `.../i/u/_/abc.jpg`. URLs without a size
/// segment are returned unchanged.
pub fn force_hd_url(url: &str) -> String {
    SIZE_SEGMENT.replace_all(url, "/i/u/_/").into_owned()
}

/// Largest non-empty image URL. Last.fm lists sizes smallest first.
pub fn best_image(images: &[dto::Image]) -> Option<&str> {
    images
        .iter()
        .rev()
        .map(|img| img.url.as_str())
        .find(|url| !url.is_empty())
}

/// Largest image, normalised to original resolution.
pub fn best_hd_image(images: &[dto::Image]) -> Option<String> {
    best_image(images).map(force_hd_url)
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

/// First entry of a recent-tracks response as the now-playing track.
pub fn to_now_playing(response: dto::RecentTracksResponse) -> Option<NowPlaying> {
    let total_scrobbles = response
        .recenttracks
        .attr
        .as_ref()
        .map(|a| a.total)
        .unwrap_or(0);
    let track = response.recenttracks.track.into_vec().into_iter().next()?;
    let is_now_playing = is_playing(&track);

    Some(NowPlaying {
        identity: TrackIdentity::new(track.artist.text, track.name).with_album(track.album.text),
        is_now_playing,
        total_scrobbles,
    })
}

pub fn to_recent_tracks(response: dto::RecentTracksResponse) -> Vec<RecentTrack> {
    response
        .recenttracks
        .track
        .into_vec()
        .into_iter()
        .map(|track| {
            let now_playing = is_playing(&track);
            let (played_at, played_at_text) = match track.date {
                Some(date) => ((date.uts > 0).then_some(date.uts), non_empty(date.text)),
                None => (None, None),
            };
            RecentTrack {
                name: track.name,
                artist: track.artist.text,
                album: non_empty(track.album.text),
                url: track.url,
                now_playing,
                played_at,
                played_at_text,
            }
        })
        .collect()
}

pub fn to_user_profile(response: dto::UserInfoResponse) -> UserProfile {
    let user = response.user;
    let avatar = |index: usize| {
        user.image
            .get(index)
            .map(|img| img.url.clone())
            .and_then(non_empty)
    };
    UserProfile {
        avatar_small: avatar(0),
        avatar_large: avatar(2).or_else(|| best_image(&user.image).map(str::to_string)),
        name: user.name,
        url: user.url,
        playcount: user.playcount,
        artist_count: user.artist_count,
        country: user.country.and_then(non_empty),
        registered: user.registered.map(|r| r.unixtime).filter(|t| *t > 0),
    }
}

pub fn to_top_items(response: dto::TopItemsResponse) -> Vec<TopItem> {
    response
        .list
        .items
        .into_vec()
        .into_iter()
        .map(|item| TopItem {
            image: best_image(&item.image).map(str::to_string),
            artist: item.artist.map(|a| a.name).and_then(non_empty),
            name: item.name,
            playcount: item.playcount,
            url: item.url,
        })
        .collect()
}

pub fn to_chart_tracks(response: dto::WeeklyTrackChartResponse) -> Vec<ChartTrack> {
    response
        .weeklytrackchart
        .track
        .into_vec()
        .into_iter()
        .enumerate()
        .map(|(i, track)| ChartTrack {
            rank: track
                .attr
                .map(|a| a.rank)
                .filter(|r| *r > 0)
                .unwrap_or(i as u64 + 1),
            name: track.name,
            artist: track.artist.text,
            playcount: track.playcount,
            url: track.url,
        })
        .collect()
}

pub fn to_track_stats(track: &dto::TrackInfo) -> TrackStats {
    TrackStats {
        playcount: track.userplaycount,
        duration_ms: Some(track.duration).filter(|d| *d > 0),
    }
}

fn is_playing(track: &dto::RecentTrack) -> bool {
    track
        .attr
        .as_ref()
        .is_some_and(|a| a.nowplaying.as_deref() != Some("false"))
}
