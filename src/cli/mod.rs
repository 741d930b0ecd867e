//! Command-line interface for lastfm-lens.
//!
//! One subcommand per view of the user's Last.fm data, plus cache and
//! config maintenance.

mod commands;

pub use commands::{Cli, Commands, run_command};
