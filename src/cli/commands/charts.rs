//! Top lists, weekly chart, album collage and listening timeline.

use std::path::Path;

use anyhow::{Context as _, bail};
use tokio::runtime::Runtime;

use super::{Context, rank};
use crate::embed::{COLOR_LASTFM, Embed};
use crate::formatting::format_number;
use crate::lastfm::{ChartTrack, Period, TopCategory, TopItem};
use crate::visual::{self, GridSize};

/// Show top artists, albums or tracks
pub fn cmd_top(
    rt: &Runtime,
    ctx: &Context,
    category: TopCategory,
    period: Period,
    limit: u32,
) -> anyhow::Result<()> {
    let lastfm = ctx.lastfm()?;

    rt.block_on(async {
        let items = lastfm
            .top_items(category, period, limit)
            .await
            .with_context(|| format!("Could not fetch top {}", category.title().to_lowercase()))?;

        if items.is_empty() {
            println!("✗ No data found for top {}.", category.title().to_lowercase());
            return Ok(());
        }

        ctx.emit(&top_embed(category, period, &items))
    })
}

/// Show this week's track chart
pub fn cmd_weekly(rt: &Runtime, ctx: &Context, limit: u32) -> anyhow::Result<()> {
    let lastfm = ctx.lastfm()?;

    rt.block_on(async {
        let mut tracks = lastfm
            .weekly_track_chart()
            .await
            .context("Could not fetch weekly chart")?;
        tracks.truncate(limit as usize);

        if tracks.is_empty() {
            println!("✗ Nothing scrobbled this week.");
            return Ok(());
        }

        ctx.emit(&weekly_embed(&tracks))
    })
}

/// Write a PNG collage of top albums
pub fn cmd_collage(
    rt: &Runtime,
    ctx: &Context,
    size: GridSize,
    period: Period,
    output: &Path,
) -> anyhow::Result<()> {
    let lastfm = ctx.lastfm()?;

    rt.block_on(async {
        let albums = lastfm
            .top_items(TopCategory::Albums, period, size.cells() as u32)
            .await
            .context("Could not fetch top albums")?;

        let urls: Vec<Option<String>> = albums.into_iter().map(|a| a.image).collect();
        let Some(png) = visual::create_collage(&ctx.http, &urls, size).await? else {
            bail!("Not enough top albums to generate a collage.");
        };

        visual::save_collage(output, &png)?;
        tracing::info!("Wrote {} byte collage to {:?}", png.len(), output);

        let embed = Embed::new(format!("Top Albums Collage ({period})"), COLOR_LASTFM)
            .image(Some(output.display().to_string()));
        ctx.emit(&embed)
    })
}

/// Print a QuickChart link of scrobbles per day
pub fn cmd_timeline(rt: &Runtime, ctx: &Context, limit: u32, title: &str) -> anyhow::Result<()> {
    let lastfm = ctx.lastfm()?;

    rt.block_on(async {
        let tracks = lastfm
            .recent_tracks(limit)
            .await
            .context("Could not fetch recent tracks")?;

        let Some(url) = visual::timeline_url(&tracks, title) else {
            bail!("No dated scrobbles to plot.");
        };

        let embed = Embed::new(title, COLOR_LASTFM)
            .url(url.clone())
            .image(Some(url));
        ctx.emit(&embed)
    })
}

pub(crate) fn top_embed(category: TopCategory, period: Period, items: &[TopItem]) -> Embed {
    let description: String = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut line = format!("{} {}", rank(i + 1), item.name);
            if category != TopCategory::Artists
                && let Some(artist) = item.artist.as_deref().filter(|a| !a.is_empty())
            {
                line.push_str(&format!(" - *{artist}*"));
            }
            line.push_str(&format!(" ({} plays)\n", format_number(item.playcount)));
            line
        })
        .collect();

    Embed::new(format!("Top {} ({period})", category.title()), COLOR_LASTFM).description(description)
}

pub(crate) fn weekly_embed(tracks: &[ChartTrack]) -> Embed {
    let description: String = tracks
        .iter()
        .map(|t| {
            format!(
                "{} {} - *{}* ({} plays)\n",
                rank(t.rank),
                t.name,
                t.artist,
                format_number(t.playcount)
            )
        })
        .collect();

    Embed::new("Weekly Track Chart", COLOR_LASTFM).description(description)
}
