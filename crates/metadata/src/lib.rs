pub mod images;
pub mod provider;
pub mod tmdb;

use std::collections::HashMap;

use kinema_core::{Genre, MediaItem};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
    #[error("api returned status {0}")]
    Status(u16),
    #[error("decode error: {0}")]
    Decode(String),
}

/// One page of a list endpoint response.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    pub items: Vec<MediaItem>,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

/// Entry of a `videos.results` listing.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoEntry {
    pub key: String,
    pub site: String,
    pub kind: String,
}

impl VideoEntry {
    /// Whether this is a trailer hosted on the primary video platform.
    pub fn is_trailer(&self) -> bool {
        self.kind == "Trailer" && self.site == "YouTube"
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StreamingProvider {
    pub name: String,
    pub logo_path: Option<String>,
}

/// Regional watch availability, split by acquisition model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchProviders {
    pub flatrate: Vec<StreamingProvider>,
    pub rent: Vec<StreamingProvider>,
    pub buy: Vec<StreamingProvider>,
}

impl WatchProviders {
    pub fn is_empty(&self) -> bool {
        self.flatrate.is_empty() && self.rent.is_empty() && self.buy.is_empty()
    }
}

/// Mapping from region code (e.g. "JP", "US") to availability in that region.
pub type ProviderMap = HashMap<String, WatchProviders>;

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub author: String,
    pub rating: Option<f64>,
    pub content: String,
}

/// The primary detail payload: base item fields plus the credits and video
/// listings embedded in the same response.
#[derive(Debug, Clone)]
pub struct DetailDocument {
    pub item: MediaItem,
    pub tagline: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<Genre>,
    pub cast: Vec<CastMember>,
    pub videos: Vec<VideoEntry>,
}
