//! Last.fm domain types used by the commands.

use std::fmt;
use std::str::FromStr;

use crate::enrichment::TrackIdentity;

/// The user's latest scrobble, playing or not.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub identity: TrackIdentity,
    /// False when this is just the last finished track
    pub is_now_playing: bool,
    pub total_scrobbles: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentTrack {
    pub name: String,
    pub artist: String,
    pub album: Option<String>,
    pub url: String,
    pub now_playing: bool,
    /// Unix time of the scrobble, absent while playing
    pub played_at: Option<u64>,
    /// Last.fm's display date, e.g. `"03 Feb 2025, 10:00"`
    pub played_at_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub url: String,
    /// Small and large avatar, when set
    pub avatar_small: Option<String>,
    pub avatar_large: Option<String>,
    pub playcount: u64,
    pub artist_count: u64,
    pub country: Option<String>,
    pub registered: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopItem {
    pub name: String,
    /// Absent for top artists
    pub artist: Option<String>,
    pub playcount: u64,
    pub url: String,
    /// Largest image Last.fm offers for this entry
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartTrack {
    pub rank: u64,
    pub name: String,
    pub artist: String,
    pub playcount: u64,
    pub url: String,
}

/// The user's numbers for one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackStats {
    pub playcount: u64,
    /// Track length, when Last.fm knows it
    pub duration_ms: Option<u64>,
}

/// What a top list ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TopCategory {
    Artists,
    Albums,
    Tracks,
}

impl TopCategory {
    pub fn method(self) -> &'static str {
        match self {
            Self::Artists => "user.gettopartists",
            Self::Albums => "user.gettopalbums",
            Self::Tracks => "user.gettoptracks",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Artists => "Artists",
            Self::Albums => "Albums",
            Self::Tracks => "Tracks",
        }
    }
}

/// Time range for top lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Overall,
    #[default]
    Week,
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::HalfYear,
        Self::Year,
        Self::Overall,
    ];

    /// Value of the API's `period` parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::Week => "7day",
            Self::Month => "1month",
            Self::Quarter => "3month",
            Self::HalfYear => "6month",
            Self::Year => "12month",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_param().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown period '{s}' (expected overall, 7day, 1month, 3month, 6month or 12month)")
            })
    }
}
