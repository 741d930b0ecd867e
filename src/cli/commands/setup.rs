//! Config file and external tool commands.

use std::path::Path;

use super::Context;
use crate::config::{self, ConfigError};

/// Print the config file location
pub fn cmd_config_path(explicit: Option<&Path>) -> anyhow::Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path().ok_or(ConfigError::NoConfigDir)?,
    };
    println!("{}", path.display());
    Ok(())
}

/// Store Last.fm credentials in the config file, keeping its other settings
pub fn cmd_config_init(explicit: Option<&Path>, api_key: &str, user: &str) -> anyhow::Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path().ok_or(ConfigError::NoConfigDir)?,
    };

    let mut config = config::load_from(&path);
    config.credentials.lastfm_api_key = Some(api_key.trim().to_string());
    config.credentials.lastfm_username = Some(user.trim().to_string());
    config::save_to(&config, &path)?;

    println!("✓ Saved credentials for {} to {}", user.trim(), path.display());
    Ok(())
}

/// Check if external tools are installed
pub fn cmd_check_tools(ctx: &Context) {
    println!("Checking enrichment tools...\n");

    let youtube = ctx.youtube();
    if let Some(version) = youtube.version() {
        println!("✓ yt-dlp: {}", version);
    } else {
        println!("✗ yt-dlp: not found ({})", ctx.config.youtube.ytdlp_path.display());
        println!("  YouTube links will be skipped. Install yt-dlp:");
        println!("    Windows: winget install yt-dlp");
        println!("    macOS:   brew install yt-dlp");
        println!("    Linux:   pipx install yt-dlp");
    }

    match (
        ctx.config.credentials.api_key(),
        ctx.config.credentials.username(),
    ) {
        (Ok(_), Ok(user)) => println!("✓ Last.fm credentials for {}", user),
        (Err(e), _) | (_, Err(e)) => println!("✗ {}", e),
    }

    println!("✓ Cache: {}", ctx.config.cache.resolved_path().display());
}
