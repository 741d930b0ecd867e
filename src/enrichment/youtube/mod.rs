//! YouTube video links, found through the `yt-dlp` tool.

mod search;

pub use search::{YouTubeSearch, search_queries, watch_url};
