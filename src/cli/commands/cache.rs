//! Enrichment cache maintenance commands.

use tokio::runtime::Runtime;

use super::Context;
use crate::enrichment::{CacheKey, EnrichmentField, EnrichmentRecord};
use crate::error::Error;

/// List cached tracks and which fields they have
pub fn cmd_cache_list(rt: &Runtime, ctx: &Context) -> anyhow::Result<()> {
    let store = ctx.store();

    rt.block_on(async {
        let entries = store.snapshot().await;
        if entries.is_empty() {
            println!("Cache is empty ({})", store.path().display());
            return Ok(());
        }

        for (key, record) in &entries {
            println!("{}  {}", field_flags(record), key);
        }
        println!();
        println!("{} cached tracks", entries.len());
        Ok(())
    })
}

/// Print one cached record as JSON
pub fn cmd_cache_show(rt: &Runtime, ctx: &Context, key: &str) -> anyhow::Result<()> {
    let store = ctx.store();

    rt.block_on(async {
        let record = store
            .get(&CacheKey::from(key))
            .await
            .ok_or_else(|| Error::not_found(key))?;
        println!("{}", serde_json::to_string_pretty(&record)?);
        Ok(())
    })
}

/// Remove one cached record
pub fn cmd_cache_remove(rt: &Runtime, ctx: &Context, key: &str) -> anyhow::Result<()> {
    let store = ctx.store();

    rt.block_on(async {
        if store.remove(&CacheKey::from(key)).await? {
            println!("✓ Removed {key}");
        } else {
            println!("✗ Not cached: {key}");
        }
        Ok(())
    })
}

/// Remove every cached record
pub fn cmd_cache_clear(rt: &Runtime, ctx: &Context) -> anyhow::Result<()> {
    let store = ctx.store();

    rt.block_on(async {
        let count = store.len().await;
        store.clear().await?;
        println!("✓ Cleared {count} cached tracks");
        Ok(())
    })
}

/// Print the cache file location
pub fn cmd_cache_path(ctx: &Context) {
    println!("{}", ctx.config.cache.resolved_path().display());
}

/// `[ART YT LYR]` style summary, `-` for missing fields.
pub(crate) fn field_flags(record: &EnrichmentRecord) -> String {
    let flags: Vec<&str> = EnrichmentField::ALL
        .iter()
        .map(|&field| match (field, record.is_resolved(field)) {
            (EnrichmentField::AlbumArt, true) => "ART",
            (EnrichmentField::YouTube, true) => "YT ",
            (EnrichmentField::Lyrics, true) => "LYR",
            (_, false) => " - ",
        })
        .collect();
    format!("[{}]", flags.join(" "))
}
