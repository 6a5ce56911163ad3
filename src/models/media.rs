//! Media-related data models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Content kind of a playable title.
///
/// Every kind except [`MediaKind::Movie`] is episodic and shares the TV URL
/// shape, but each selects its own styling and provider-specific path
/// segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
    Anime,
    #[serde(rename = "korean", alias = "korean-drama")]
    KoreanDrama,
    Cartoon,
}

impl MediaKind {
    /// All kinds, in page order.
    pub const ALL: [MediaKind; 5] = [
        MediaKind::Movie,
        MediaKind::Tv,
        MediaKind::Anime,
        MediaKind::KoreanDrama,
        MediaKind::Cartoon,
    ];

    /// Parse a page parameter, falling back to movie for anything unknown.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some(v) => v.parse().unwrap_or_else(|_| {
                tracing::warn!("Unknown media kind '{}', treating as movie", v);
                MediaKind::Movie
            }),
            None => MediaKind::Movie,
        }
    }

    /// Whether the kind has seasons and episodes.
    pub fn is_episodic(&self) -> bool {
        !matches!(self, MediaKind::Movie)
    }

    /// Styling class applied to active tiles and buttons.
    pub fn style_class(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movies",
            MediaKind::Tv => "tvshows",
            MediaKind::Anime => "anime",
            MediaKind::KoreanDrama => "korean",
            MediaKind::Cartoon => "cartoon",
        }
    }

    /// Styling class for episode tiles. Cartoons share the TV tile style.
    pub fn tile_class(&self) -> &'static str {
        match self {
            MediaKind::Anime => "anime",
            MediaKind::KoreanDrama => "korean",
            _ => "tvshows",
        }
    }

    /// Human-readable label used in loading messages.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "TV show",
            MediaKind::Anime => "anime",
            MediaKind::KoreanDrama => "Korean drama",
            MediaKind::Cartoon => "cartoon",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Tv => write!(f, "tv"),
            MediaKind::Anime => write!(f, "anime"),
            MediaKind::KoreanDrama => write!(f, "korean"),
            MediaKind::Cartoon => write!(f, "cartoon"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaKind::Movie),
            "tv" | "tvshows" => Ok(MediaKind::Tv),
            "anime" => Ok(MediaKind::Anime),
            "korean" | "korean-drama" => Ok(MediaKind::KoreanDrama),
            "cartoon" => Ok(MediaKind::Cartoon),
            _ => Err(crate::Error::UnknownMediaKind(s.to_string())),
        }
    }
}

/// Identifies a playable unit for the lifetime of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaReference {
    /// Opaque external identifier (TMDB id).
    pub id: String,
    /// Content kind.
    pub kind: MediaKind,
    /// Display title, once metadata is known.
    pub title: Option<String>,
}

impl MediaReference {
    /// Create a reference without a title.
    pub fn new(id: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            kind,
            title: None,
        }
    }

    /// Attach a display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A season/episode pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRef {
    pub season: u32,
    pub episode: u32,
}

impl EpisodeRef {
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

impl Default for EpisodeRef {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Current playback choice for a media reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSelection {
    /// Selected provider id.
    pub provider_id: String,
    /// Selected season/episode; `None` for movies and before metadata loads.
    pub episode: Option<EpisodeRef>,
}

impl PlaybackSelection {
    /// Selection with no season/episode.
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            episode: None,
        }
    }

    /// Selection pointing at a specific episode.
    pub fn episode(provider_id: impl Into<String>, season: u32, episode: u32) -> Self {
        Self {
            provider_id: provider_id.into(),
            episode: Some(EpisodeRef::new(season, episode)),
        }
    }
}

/// Season summary from TMDB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season_number: u32,
    #[serde(default)]
    pub episode_count: u32,
}

/// Subset of TMDB movie/tv details consumed by the player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaDetails {
    /// TMDB ID.
    pub id: u64,
    /// TV name.
    #[serde(default)]
    pub name: Option<String>,
    /// Movie title.
    #[serde(default)]
    pub title: Option<String>,
    /// Seasons (TV only).
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
}

impl MediaDetails {
    /// Display title, preferring the movie title over the TV name.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }

    /// Seasons that have at least one episode.
    pub fn playable_seasons(&self) -> Vec<SeasonSummary> {
        self.seasons
            .iter()
            .copied()
            .filter(|s| s.episode_count > 0)
            .collect()
    }
}
