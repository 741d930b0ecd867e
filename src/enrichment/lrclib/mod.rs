//! LRCLIB integration
//!
//! Free lyrics database at lrclib.net. No API key required.

mod client;
pub mod dto;

pub use client::LrclibClient;
