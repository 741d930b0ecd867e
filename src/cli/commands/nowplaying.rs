//! Now-playing card: latest scrobble plus cached enrichment.

use std::sync::Arc;

use anyhow::Context as _;
use tokio::runtime::Runtime;

use super::Context;
use crate::embed::{COLOR_WHITE, Embed};
use crate::enrichment::{EnrichmentField, EnrichmentRecord};
use crate::formatting::{format_duration, format_number};
use crate::lastfm::{NowPlaying, TrackStats};

/// Show the current track with album art, YouTube link and optionally lyrics
pub fn cmd_now_playing(rt: &Runtime, ctx: &Context, show_lyrics: bool) -> anyhow::Result<()> {
    let lastfm = Arc::new(ctx.lastfm()?);
    let pipeline = ctx.pipeline(Arc::clone(&lastfm));

    rt.block_on(async {
        let Some(np) = lastfm
            .now_playing()
            .await
            .context("Could not fetch now playing data")?
        else {
            println!("✗ No scrobbles yet for {}", lastfm.username());
            return Ok(());
        };

        let (record, stats) = tokio::join!(
            pipeline.enrich(&np.identity),
            lastfm.track_stats(&np.identity.artist, &np.identity.track),
        );
        let stats = stats
            .inspect_err(|e| tracing::debug!("Track stats unavailable: {e}"))
            .ok();

        ctx.emit(&now_playing_embed(&np, &record, stats, show_lyrics))
    })
}

pub(crate) fn now_playing_embed(
    np: &NowPlaying,
    record: &EnrichmentRecord,
    stats: Option<TrackStats>,
    show_lyrics: bool,
) -> Embed {
    let id = &np.identity;
    let title = if np.is_now_playing {
        "Now Playing"
    } else {
        "Last Played"
    };

    let mut description = format!("**{}**\nby *{}*", id.track, id.artist);
    if show_lyrics {
        description.push_str("\n\n");
        description.push_str(
            record
                .get(EnrichmentField::Lyrics)
                .unwrap_or("No lyrics found."),
        );
    }

    let owned = |field| record.get(field).map(str::to_string);

    Embed::new(title, COLOR_WHITE)
        .description(description)
        .field_opt("Album", id.album.clone(), false)
        .field_opt("YouTube", owned(EnrichmentField::YouTube), false)
        .field_opt("Your plays", stats.map(|s| format_number(s.playcount)), true)
        .field_opt(
            "Duration",
            stats.and_then(|s| s.duration_ms).map(format_duration),
            true,
        )
        .field("Scrobbles", format_number(np.total_scrobbles), true)
        .image(owned(EnrichmentField::AlbumArt))
}
