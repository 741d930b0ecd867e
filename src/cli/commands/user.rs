//! Profile and recent-scrobble commands.

use anyhow::Context as _;
use tokio::runtime::Runtime;

use super::{Context, rank};
use crate::embed::{COLOR_LASTFM, Embed};
use crate::formatting::{format_date, format_number};
use crate::lastfm::{RecentTrack, UserProfile};

/// Show the Last.fm profile stats
pub fn cmd_profile(rt: &Runtime, ctx: &Context) -> anyhow::Result<()> {
    let lastfm = ctx.lastfm()?;

    rt.block_on(async {
        let profile = lastfm
            .user_info()
            .await
            .context("Could not fetch user data")?;
        ctx.emit(&profile_embed(&profile))
    })
}

/// List the latest scrobbles
pub fn cmd_recent(rt: &Runtime, ctx: &Context, limit: u32) -> anyhow::Result<()> {
    let lastfm = ctx.lastfm()?;

    rt.block_on(async {
        let (tracks, profile) = tokio::join!(lastfm.recent_tracks(limit), lastfm.user_info());
        let tracks = tracks.context("Could not fetch recent tracks")?;

        if tracks.is_empty() {
            println!("✗ No recent tracks for {}", lastfm.username());
            return Ok(());
        }

        ctx.emit(&recent_embed(&tracks, profile.ok().as_ref()))
    })
}

pub(crate) fn profile_embed(profile: &UserProfile) -> Embed {
    Embed::new(format!("👤 {}", profile.name), COLOR_LASTFM)
        .url(&profile.url)
        .thumbnail(profile.avatar_large.clone())
        .field("Scrobbles", format_number(profile.playcount), true)
        .field("Artists", format_number(profile.artist_count), true)
        .field(
            "Country",
            profile.country.as_deref().unwrap_or("Unknown"),
            true,
        )
        .field(
            "Registered",
            profile
                .registered
                .map_or_else(|| "Unknown".to_string(), format_date),
            false,
        )
}

pub(crate) fn recent_embed(tracks: &[RecentTrack], profile: Option<&UserProfile>) -> Embed {
    let description: String = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let marker = if t.now_playing { " (now playing)" } else { "" };
            format!("{} [{}]({}) - *{}*{}\n", rank(i + 1), t.name, t.url, t.artist, marker)
        })
        .collect();

    let embed = Embed::new("Recent Tracks", COLOR_LASTFM).description(description);
    match profile {
        Some(p) => embed.author(format!("{}'s History", p.name), p.avatar_small.clone()),
        None => embed,
    }
}
