use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Media classification as reported by the metadata API's `media_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Tv,
    Person,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Person => "person",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Tv),
            "person" => Some(Self::Person),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named list view. The first four map onto dedicated movie category
/// endpoints; `Tv` uses discovery and `Favorites` is purely local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
    Tv,
    Favorites,
}

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
            Self::NowPlaying => "now_playing",
            Self::Tv => "tv",
            Self::Favorites => "favorites",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "popular" => Some(Self::Popular),
            "top_rated" => Some(Self::TopRated),
            "upcoming" => Some(Self::Upcoming),
            "now_playing" => Some(Self::NowPlaying),
            "tv" => Some(Self::Tv),
            "favorites" => Some(Self::Favorites),
            _ => None,
        }
    }

    /// The `/movie/{category}` path segment, for the movie-category tabs only.
    pub fn movie_category(self) -> Option<&'static str> {
        match self {
            Self::Popular | Self::TopRated | Self::Upcoming | Self::NowPlaying => {
                Some(self.as_str())
            }
            Self::Tv | Self::Favorites => None,
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a list view. Identity is `(id, kind)`; immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub rating: Option<f64>,
    pub overview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_round_trips_through_parse() {
        for tab in [
            Tab::Popular,
            Tab::TopRated,
            Tab::Upcoming,
            Tab::NowPlaying,
            Tab::Tv,
            Tab::Favorites,
        ] {
            assert_eq!(Tab::parse(tab.as_str()), Some(tab));
        }
        assert_eq!(Tab::parse("trending"), None);
    }

    #[test]
    fn movie_category_only_for_movie_tabs() {
        assert_eq!(Tab::Upcoming.movie_category(), Some("upcoming"));
        assert_eq!(Tab::TopRated.movie_category(), Some("top_rated"));
        assert_eq!(Tab::Tv.movie_category(), None);
        assert_eq!(Tab::Favorites.movie_category(), None);
    }
}
