use kinema_core::{Genre, MediaKind, Tab};

use crate::{DetailDocument, FetchError, ListPage, ProviderMap, Review, VideoEntry};

/// A fully resolved list request. Exactly one selection mode applies; the
/// aggregator derives the variant from view state by a fixed priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    /// Free-text multi-type search. Wins over tab and genre.
    Search { text: String, page: u32 },
    /// TV discovery, optionally constrained by genre.
    DiscoverTv { genre: Option<u32>, page: u32 },
    /// Movie discovery constrained by genre, most popular first.
    DiscoverMovie { genre: u32, page: u32 },
    /// A dedicated movie category endpoint (popular, upcoming, ...).
    MovieCategory { category: Tab, page: u32 },
}

impl ListQuery {
    pub fn page(&self) -> u32 {
        match self {
            Self::Search { page, .. }
            | Self::DiscoverTv { page, .. }
            | Self::DiscoverMovie { page, .. }
            | Self::MovieCategory { page, .. } => *page,
        }
    }
}

/// A metadata source the aggregators can query. Implemented by [`crate::tmdb::TmdbClient`];
/// tests substitute canned sources.
#[async_trait::async_trait]
pub trait MediaSource: Send + Sync {
    /// Fetch one page of a list view.
    async fn fetch_list(&self, query: &ListQuery, language: &str)
    -> Result<ListPage, FetchError>;

    /// Fetch the genre taxonomy (labels depend on the display language).
    async fn genre_list(&self, language: &str) -> Result<Vec<Genre>, FetchError>;

    /// Fetch the primary detail payload with credits and videos embedded.
    async fn fetch_detail(
        &self,
        kind: MediaKind,
        id: u64,
        language: &str,
    ) -> Result<DetailDocument, FetchError>;

    /// Fetch only the video listings for an item.
    async fn fetch_videos(
        &self,
        kind: MediaKind,
        id: u64,
        language: &str,
    ) -> Result<Vec<VideoEntry>, FetchError>;

    /// Fetch watch availability keyed by region code.
    async fn fetch_watch_providers(
        &self,
        kind: MediaKind,
        id: u64,
        language: &str,
    ) -> Result<ProviderMap, FetchError>;

    /// Fetch user reviews for an item.
    async fn fetch_reviews(
        &self,
        kind: MediaKind,
        id: u64,
        language: &str,
    ) -> Result<Vec<Review>, FetchError>;

    /// Fetch titles similar to an item.
    async fn fetch_similar(
        &self,
        kind: MediaKind,
        id: u64,
        language: &str,
    ) -> Result<Vec<kinema_core::MediaItem>, FetchError>;
}
