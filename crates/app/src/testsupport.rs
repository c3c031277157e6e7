//! Scripted metadata source for aggregator tests.
//!
//! Each endpoint pops from its own queue; an exhausted queue fails the call,
//! so tests also catch requests that should never have been issued.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::NaiveDate;
use kinema_core::{Genre, MediaItem, MediaKind};
use kinema_metadata::provider::{ListQuery, MediaSource};
use kinema_metadata::{DetailDocument, FetchError, ListPage, ProviderMap, Review, VideoEntry};

pub struct MockSource {
    pub lists: Mutex<VecDeque<Result<ListPage, FetchError>>>,
    pub genres: Mutex<VecDeque<Result<Vec<Genre>, FetchError>>>,
    pub details: Mutex<VecDeque<Result<DetailDocument, FetchError>>>,
    pub videos: Mutex<VecDeque<Result<Vec<VideoEntry>, FetchError>>>,
    pub providers: Mutex<VecDeque<Result<ProviderMap, FetchError>>>,
    pub reviews: Mutex<VecDeque<Result<Vec<Review>, FetchError>>>,
    pub similar: Mutex<VecDeque<Result<Vec<MediaItem>, FetchError>>>,
    /// Per-item similar responses, consulted before the queue. Keying by id
    /// keeps concurrent fetches deterministic.
    pub similar_by_id: Mutex<HashMap<u64, Result<Vec<MediaItem>, FetchError>>>,
    /// When set, each similar fetch parks until released with
    /// [`MockSource::release_similar`].
    gated: AtomicBool,
    gate: tokio::sync::Semaphore,
    /// Queries seen by `fetch_list`, in order.
    pub seen_queries: Mutex<Vec<ListQuery>>,
    /// Language tags seen by `fetch_detail` / `fetch_videos`, in order.
    pub seen_detail_languages: Mutex<Vec<String>>,
    pub seen_video_languages: Mutex<Vec<String>>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            lists: Mutex::default(),
            genres: Mutex::default(),
            details: Mutex::default(),
            videos: Mutex::default(),
            providers: Mutex::default(),
            reviews: Mutex::default(),
            similar: Mutex::default(),
            similar_by_id: Mutex::default(),
            gated: AtomicBool::new(false),
            gate: tokio::sync::Semaphore::new(0),
            seen_queries: Mutex::default(),
            seen_detail_languages: Mutex::default(),
            seen_video_languages: Mutex::default(),
        }
    }
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list(&self, page: Result<ListPage, FetchError>) {
        self.lists.lock().unwrap().push_back(page);
    }

    pub fn push_detail(&self, doc: Result<DetailDocument, FetchError>) {
        self.details.lock().unwrap().push_back(doc);
    }

    pub fn respond_similar(&self, id: u64, result: Result<Vec<MediaItem>, FetchError>) {
        self.similar_by_id.lock().unwrap().insert(id, result);
    }

    pub fn hold_similar(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    /// Lets one parked similar fetch proceed. Permits accumulate, so
    /// releasing before the fetch arrives also works.
    pub fn release_similar(&self) {
        self.gate.add_permits(1);
    }

    fn pop<T>(queue: &Mutex<VecDeque<Result<T, FetchError>>>) -> Result<T, FetchError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("unexpected request".to_string())))
    }
}

#[async_trait::async_trait]
impl MediaSource for MockSource {
    async fn fetch_list(
        &self,
        query: &ListQuery,
        _language: &str,
    ) -> Result<ListPage, FetchError> {
        self.seen_queries.lock().unwrap().push(query.clone());
        Self::pop(&self.lists)
    }

    async fn genre_list(&self, _language: &str) -> Result<Vec<Genre>, FetchError> {
        Self::pop(&self.genres)
    }

    async fn fetch_detail(
        &self,
        _kind: MediaKind,
        _id: u64,
        language: &str,
    ) -> Result<DetailDocument, FetchError> {
        self.seen_detail_languages
            .lock()
            .unwrap()
            .push(language.to_string());
        Self::pop(&self.details)
    }

    async fn fetch_videos(
        &self,
        _kind: MediaKind,
        _id: u64,
        language: &str,
    ) -> Result<Vec<VideoEntry>, FetchError> {
        self.seen_video_languages
            .lock()
            .unwrap()
            .push(language.to_string());
        Self::pop(&self.videos)
    }

    async fn fetch_watch_providers(
        &self,
        _kind: MediaKind,
        _id: u64,
        _language: &str,
    ) -> Result<ProviderMap, FetchError> {
        Self::pop(&self.providers)
    }

    async fn fetch_reviews(
        &self,
        _kind: MediaKind,
        _id: u64,
        _language: &str,
    ) -> Result<Vec<Review>, FetchError> {
        Self::pop(&self.reviews)
    }

    async fn fetch_similar(
        &self,
        _kind: MediaKind,
        id: u64,
        _language: &str,
    ) -> Result<Vec<MediaItem>, FetchError> {
        if self.gated.load(Ordering::SeqCst) {
            // Never closed, so acquire cannot fail.
            self.gate.acquire().await.unwrap().forget();
        }
        if let Some(result) = self.similar_by_id.lock().unwrap().remove(&id) {
            return result;
        }
        Self::pop(&self.similar)
    }
}

pub fn item(id: u64, kind: MediaKind) -> MediaItem {
    MediaItem {
        id,
        kind,
        title: format!("Title {id}"),
        release_date: None,
        poster_path: Some(format!("/poster{id}.jpg")),
        backdrop_path: None,
        rating: Some(7.0),
        overview: Some("An overview.".to_string()),
    }
}

pub fn item_released(id: u64, date: NaiveDate) -> MediaItem {
    MediaItem {
        release_date: Some(date),
        ..item(id, MediaKind::Movie)
    }
}

pub fn detail_doc(id: u64, kind: MediaKind) -> DetailDocument {
    DetailDocument {
        item: item(id, kind),
        tagline: Some("A tagline.".to_string()),
        runtime_minutes: Some(120),
        genres: Vec::new(),
        cast: Vec::new(),
        videos: Vec::new(),
    }
}
