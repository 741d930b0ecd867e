//! CLI command definitions and dispatch.
//!
//! Each group of subcommands is implemented in its own submodule:
//! - `nowplaying`: Current track card with enrichment
//! - `user`: Profile and recent scrobbles
//! - `charts`: Top lists, weekly chart, collage and timeline
//! - `currency`: Currency conversion
//! - `cache`: Enrichment cache maintenance
//! - `setup`: Config file and tool checks

mod cache;
mod charts;
mod currency;
mod nowplaying;
mod setup;
mod user;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::config::{self, Config, ConfigError};
use crate::embed::Embed;
use crate::enrichment::{EnrichmentPipeline, EnrichmentStore, LrclibClient, YouTubeSearch};
use crate::lastfm::{LastFmClient, Period, TopCategory};
use crate::visual::GridSize;

pub use cache::{cmd_cache_clear, cmd_cache_list, cmd_cache_path, cmd_cache_remove, cmd_cache_show};
pub use charts::{cmd_collage, cmd_timeline, cmd_top, cmd_weekly};
pub use currency::cmd_convert;
pub use nowplaying::cmd_now_playing;
pub use setup::{cmd_check_tools, cmd_config_init, cmd_config_path};
pub use user::{cmd_profile, cmd_recent};

/// lastfm-lens CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Last.fm API key (overrides config file)
    #[arg(long, global = true, env = "LASTFM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Last.fm username (overrides config file)
    #[arg(short, long, global = true, env = "LASTFM_USERNAME")]
    pub user: Option<String>,

    /// Enrichment cache file (overrides config file)
    #[arg(long, global = true, env = "LASTFM_LENS_CACHE")]
    pub cache: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print cards as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the current (or last) track with album art, video and lyrics
    NowPlaying {
        /// Include lyrics in the card
        #[arg(long)]
        lyrics: bool,
    },
    /// List recent scrobbles
    Recent {
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },
    /// Show the Last.fm profile
    Profile,
    /// Top artists, albums or tracks
    Top {
        category: TopCategory,
        /// overall, 7day, 1month, 3month, 6month or 12month
        #[arg(short, long, default_value = "7day")]
        period: Period,
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },
    /// This week's track chart
    Weekly {
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },
    /// Render a PNG collage of top albums
    Collage {
        /// Grid edge: 3 (3x3) or 5 (5x5)
        #[arg(short, long, value_enum, default_value = "3")]
        size: GridSize,
        #[arg(short, long, default_value = "7day")]
        period: Period,
        /// Where to write the PNG
        #[arg(short, long, default_value = "collage.png")]
        output: PathBuf,
    },
    /// Chart of scrobbles per day, as a QuickChart link
    Timeline {
        /// Number of recent scrobbles to plot (Last.fm caps this at 200)
        #[arg(short, long, default_value = "200")]
        limit: u32,
        #[arg(long, default_value = crate::visual::timeline::DEFAULT_TITLE)]
        title: String,
    },
    /// Convert currency, e.g. `convert 100 usd to eur`
    Convert {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Inspect or edit the enrichment cache
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
    /// Check if external tools are installed
    CheckTools,
}

#[derive(Subcommand)]
pub enum CacheCommand {
    /// List cached tracks
    List,
    /// Show one cached record
    Show {
        /// Cache key, `Artist - Track`
        key: String,
    },
    /// Forget one cached record
    Remove { key: String },
    /// Forget everything
    Clear,
    /// Print the cache file location
    Path,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,
    /// Write credentials to the config file
    Init {
        #[arg(long)]
        api_key: String,
        #[arg(long)]
        user: String,
    },
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was specified
/// (meaning usage should be shown).
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    let Some(command) = &cli.command else {
        return Ok(false);
    };

    let rt = Runtime::new()?;
    let ctx = Context::from_cli(cli)?;

    match command {
        Commands::NowPlaying { lyrics } => cmd_now_playing(&rt, &ctx, *lyrics)?,
        Commands::Recent { limit } => cmd_recent(&rt, &ctx, *limit)?,
        Commands::Profile => cmd_profile(&rt, &ctx)?,
        Commands::Top {
            category,
            period,
            limit,
        } => cmd_top(&rt, &ctx, *category, *period, *limit)?,
        Commands::Weekly { limit } => cmd_weekly(&rt, &ctx, *limit)?,
        Commands::Collage {
            size,
            period,
            output,
        } => cmd_collage(&rt, &ctx, *size, *period, output)?,
        Commands::Timeline { limit, title } => cmd_timeline(&rt, &ctx, *limit, title)?,
        Commands::Convert { text } => cmd_convert(&rt, &ctx, &text.join(" "))?,
        Commands::Cache { action } => match action {
            CacheCommand::List => cmd_cache_list(&rt, &ctx)?,
            CacheCommand::Show { key } => cmd_cache_show(&rt, &ctx, key)?,
            CacheCommand::Remove { key } => cmd_cache_remove(&rt, &ctx, key)?,
            CacheCommand::Clear => cmd_cache_clear(&rt, &ctx)?,
            CacheCommand::Path => cmd_cache_path(&ctx),
        },
        Commands::Config { action } => match action {
            ConfigCommand::Path => cmd_config_path(cli.config.as_deref())?,
            ConfigCommand::Init { api_key, user } => {
                cmd_config_init(cli.config.as_deref(), api_key, user)?
            }
        },
        Commands::CheckTools => cmd_check_tools(&ctx),
    }

    Ok(true)
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Settings and shared clients for one command run.
pub struct Context {
    pub config: Config,
    pub http: reqwest::Client,
    pub json: bool,
}

impl Context {
    /// Config file values with command-line overrides applied.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => config::load_from(path),
            None => config::load(),
        };
        apply_overrides(&mut config, cli);

        let http = config.http.build_client()?;
        Ok(Self {
            config,
            http,
            json: cli.json,
        })
    }

    pub fn lastfm(&self) -> Result<LastFmClient, ConfigError> {
        let creds = &self.config.credentials;
        Ok(LastFmClient::new(
            self.http.clone(),
            creds.api_key()?,
            creds.username()?,
        ))
    }

    pub fn store(&self) -> EnrichmentStore {
        EnrichmentStore::new(self.config.cache.resolved_path())
    }

    pub fn youtube(&self) -> YouTubeSearch {
        YouTubeSearch::new(
            self.config.youtube.ytdlp_path.clone(),
            self.config.youtube.socket_timeout(),
        )
    }

    pub fn pipeline(&self, lastfm: Arc<LastFmClient>) -> EnrichmentPipeline {
        EnrichmentPipeline::new(
            Arc::new(self.store()),
            lastfm,
            Arc::new(self.youtube()),
            Arc::new(LrclibClient::new(self.http.clone())),
        )
    }

    /// Print a card in the selected output format.
    pub fn emit(&self, embed: &Embed) -> anyhow::Result<()> {
        if self.json {
            println!("{}", embed.to_json()?);
        } else {
            print!("{embed}");
        }
        Ok(())
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(key) = &cli.api_key {
        config.credentials.lastfm_api_key = Some(key.clone());
    }
    if let Some(user) = &cli.user {
        config.credentials.lastfm_username = Some(user.clone());
    }
    if let Some(path) = &cli.cache {
        config.cache.path = Some(path.clone());
    }
}

/// Numbered list line prefix, `**1.**`.
pub(crate) fn rank(n: impl std::fmt::Display) -> String {
    format!("**{n}.**")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_top_with_period() {
        let cli = Cli::try_parse_from(["lastfm-lens", "top", "albums", "--period", "1month", "-l", "5"])
            .unwrap();

        match cli.command {
            Some(Commands::Top {
                category,
                period,
                limit,
            }) => {
                assert_eq!(category, TopCategory::Albums);
                assert_eq!(period, Period::Month);
                assert_eq!(limit, 5);
            }
            _ => panic!("expected top command"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_period() {
        assert!(Cli::try_parse_from(["lastfm-lens", "top", "tracks", "--period", "2day"]).is_err());
    }

    #[test]
    fn test_parse_collage_size() {
        let cli = Cli::try_parse_from(["lastfm-lens", "collage", "--size", "5"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Collage {
                size: GridSize::Five,
                ..
            })
        ));
        assert!(Cli::try_parse_from(["lastfm-lens", "collage", "--size", "4"]).is_err());
    }

    #[test]
    fn test_parse_convert_joins_words() {
        let cli = Cli::try_parse_from(["lastfm-lens", "convert", "100", "usd", "to", "eur"]).unwrap();
        match cli.command {
            Some(Commands::Convert { text }) => assert_eq!(text.join(" "), "100 usd to eur"),
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "lastfm-lens",
            "now-playing",
            "--user",
            "rj",
            "--cache",
            "/tmp/c.json",
        ])
        .unwrap();

        let mut config = Config::default();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.credentials.lastfm_username.as_deref(), Some("rj"));
        assert_eq!(config.cache.resolved_path(), PathBuf::from("/tmp/c.json"));
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::try_parse_from(["lastfm-lens"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!run_command(&cli).unwrap());
    }
}
