//! lastfm-lens - Last.fm listening data in the terminal.
//!
//! Shows what a user is playing (with album art, a YouTube link and lyrics,
//! cached on disk), their profile, charts, collages and listening timeline,
//! plus a small currency converter.

pub mod cli;
pub mod config;
pub mod currency;
pub mod embed;
pub mod enrichment;
pub mod error;
pub mod formatting;
pub mod lastfm;
#[cfg(test)]
pub mod test_utils;
pub mod visual;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr, so command output stays pipeable)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("lastfm_lens=info".parse()?))
        .init();

    if cli::run_command(&args)? {
        return Ok(());
    }

    // No command specified
    cli::Cli::command().print_help()?;
    Ok(())
}
