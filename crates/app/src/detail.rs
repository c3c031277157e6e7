//! Detail aggregator.
//!
//! One detail view needs several calls: the primary fetch (credits and videos
//! embedded), lazy fallback-language completion for text fields and trailer,
//! then watch providers and reviews with isolated failures. Similar titles
//! are fetched separately so the rest of the view can render first.

use kinema_core::{Genre, MediaItem, MediaKind};
use kinema_metadata::provider::MediaSource;
use kinema_metadata::{CastMember, FetchError, Review, VideoEntry, WatchProviders};
use thiserror::Error;
use tracing::warn;

/// Fixed secondary language used to fill gaps in the display language.
pub const FALLBACK_LANGUAGE: &str = "en-US";

/// Shown when neither language has an overview; never an empty string.
pub const OVERVIEW_PLACEHOLDER: &str = "No overview available.";

const PRIMARY_REGION: &str = "JP";
const SECONDARY_REGION: &str = "US";
const REVIEW_LIMIT: usize = 3;
const SIMILAR_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailSection {
    WatchProviders,
    Reviews,
    Similar,
}

impl DetailSection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WatchProviders => "watch_providers",
            Self::Reviews => "reviews",
            Self::Similar => "similar",
        }
    }
}

/// A secondary enrichment call failed; the section is absent but the detail
/// load as a whole succeeded.
#[derive(Debug, Error)]
#[error("{} unavailable: {source}", .section.as_str())]
pub struct PartialDataError {
    pub section: DetailSection,
    #[source]
    pub source: FetchError,
}

/// Everything a detail view renders from.
#[derive(Debug, Clone)]
pub struct DetailRecord {
    pub item: MediaItem,
    /// Never empty; falls back across languages and then to a placeholder.
    pub overview: String,
    pub tagline: Option<String>,
    pub genres: Vec<Genre>,
    pub runtime_minutes: Option<u32>,
    pub cast: Vec<CastMember>,
    pub trailer_key: Option<String>,
    pub watch_providers: Option<WatchProviders>,
    pub reviews: Vec<Review>,
}

#[derive(Debug)]
pub struct DetailView {
    pub record: DetailRecord,
    pub degraded: Vec<PartialDataError>,
}

/// Assemble the detail record for `(id, kind)`.
///
/// The primary fetch and its fallback completions are hard-sequenced; any
/// failure there fails the whole load. Watch providers and reviews degrade
/// independently.
pub async fn load_detail(
    source: &dyn MediaSource,
    kind: MediaKind,
    id: u64,
    language: &str,
) -> Result<DetailView, FetchError> {
    let doc = source.fetch_detail(kind, id, language).await?;

    let mut overview = doc.item.overview.clone();
    let mut tagline = doc.tagline;

    // Fill only the missing field(s) from the fallback language; a value
    // already present is never overwritten.
    if overview.is_none() || tagline.is_none() {
        let fallback = source.fetch_detail(kind, id, FALLBACK_LANGUAGE).await?;
        if overview.is_none() {
            overview = fallback.item.overview;
        }
        if tagline.is_none() {
            tagline = fallback.tagline;
        }
    }
    let overview = overview.unwrap_or_else(|| OVERVIEW_PLACEHOLDER.to_string());

    // No trailer in the display language: concatenate the fallback-language
    // listings onto the existing ones, never replace them.
    let mut videos = doc.videos;
    if !videos.iter().any(VideoEntry::is_trailer) {
        let extra = source.fetch_videos(kind, id, FALLBACK_LANGUAGE).await?;
        videos.extend(extra);
    }
    let trailer_key = videos.iter().find(|v| v.is_trailer()).map(|v| v.key.clone());

    let mut degraded = Vec::new();

    let watch_providers = match source.fetch_watch_providers(kind, id, language).await {
        Ok(mut map) => map
            .remove(PRIMARY_REGION)
            .or_else(|| map.remove(SECONDARY_REGION)),
        Err(e) => {
            warn!(id, %kind, error = %e, "watch providers unavailable");
            degraded.push(PartialDataError {
                section: DetailSection::WatchProviders,
                source: e,
            });
            None
        }
    };

    let reviews = match source.fetch_reviews(kind, id, language).await {
        Ok(reviews) => reviews.into_iter().take(REVIEW_LIMIT).collect(),
        Err(e) => {
            warn!(id, %kind, error = %e, "reviews unavailable");
            degraded.push(PartialDataError {
                section: DetailSection::Reviews,
                source: e,
            });
            Vec::new()
        }
    };

    Ok(DetailView {
        record: DetailRecord {
            item: doc.item,
            overview,
            tagline,
            genres: doc.genres,
            runtime_minutes: doc.runtime_minutes,
            cast: doc.cast,
            trailer_key,
            watch_providers,
            reviews,
        },
        degraded,
    })
}

/// Fetch similar titles: the first few entries that have a poster. Callers
/// suppress the section entirely on error or when nothing comes back.
pub async fn load_similar(
    source: &dyn MediaSource,
    kind: MediaKind,
    id: u64,
    language: &str,
) -> Result<Vec<MediaItem>, FetchError> {
    let items = source.fetch_similar(kind, id, language).await?;
    Ok(items
        .into_iter()
        .take(SIMILAR_LIMIT)
        .filter(|m| m.poster_path.is_some())
        .collect())
}
