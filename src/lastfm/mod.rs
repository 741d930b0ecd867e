//! Last.fm API integration
//!
//! Listening history, profile and chart lookups for one user, plus the album
//! art source used by enrichment.
//! API docs: https://www.last.fm/api

pub mod adapter;
mod client;
pub mod dto;
pub mod types;

pub use adapter::force_hd_url;
pub use client::LastFmClient;
pub use types::{ChartTrack, NowPlaying, Period, RecentTrack, TopCategory, TopItem, TrackStats, UserProfile};
