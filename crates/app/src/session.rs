//! Session: executes reducer commands against the metadata source and the
//! local store, emitting render outputs for a subscriber to draw.
//!
//! Most outputs come back directly from [`Session::handle`]. Similar titles
//! are the exception: the fetch runs on its own task so the detail view never
//! waits on it, and the result arrives through the background channel handed
//! out by [`Session::new`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use kinema_core::{Genre, MediaItem, MediaKind};
use kinema_metadata::provider::MediaSource;
use kinema_store::favorites::{self, FavoriteEntry};
use kinema_store::prefs::{self, Theme};
use kinema_store::{BlobStore, StoreError};
use tokio::sync::mpsc;
use tracing::warn;

use crate::detail::{self, DetailView};
use crate::event::{reduce, AppEvent, Command};
use crate::list::{self, RenderBatch};
use crate::state::ListState;

/// One drawable output. The renderer is a passive subscriber; it never reads
/// session state directly.
#[derive(Debug)]
pub enum Render {
    Replaced(Vec<MediaItem>),
    Appended(Vec<MediaItem>),
    Favorites(Vec<FavoriteEntry>),
    Genres(Vec<Genre>),
    Detail {
        view: Box<DetailView>,
        /// Whether the item is already in the favorites list, for the
        /// toggle button state.
        favorite: bool,
    },
    Similar(Vec<MediaItem>),
    FavoriteState {
        id: u64,
        kind: MediaKind,
        favorite: bool,
    },
    Theme(Theme),
    /// Primary list or detail load failed; the user may retry.
    LoadFailed(String),
}

pub struct Session {
    source: Arc<dyn MediaSource>,
    store: Arc<dyn BlobStore>,
    pub state: ListState,
    genres: Vec<Genre>,
    theme: Theme,
    /// Bumped on every detail open; stale similar-titles results are dropped.
    detail_generation: Arc<AtomicU64>,
    background: mpsc::UnboundedSender<Render>,
}

impl Session {
    /// Builds a session plus the receiver for background renders. The caller
    /// drains the receiver alongside the direct outputs of [`Session::handle`].
    pub fn new(
        source: Arc<dyn MediaSource>,
        store: Arc<dyn BlobStore>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Render>), StoreError> {
        let language = prefs::language(store.as_ref())?;
        let theme = prefs::theme(store.as_ref())?;
        let (background, receiver) = mpsc::unbounded_channel();
        let session = Self {
            source,
            store,
            state: ListState {
                language,
                ..Default::default()
            },
            genres: Vec::new(),
            theme,
            detail_generation: Arc::new(AtomicU64::new(0)),
            background,
        };
        Ok((session, receiver))
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn detail_generation(&self) -> u64 {
        self.detail_generation.load(Ordering::SeqCst)
    }

    /// Initial load: genre taxonomy plus the first page of the default view.
    pub async fn startup(&mut self) -> Vec<Render> {
        let mut out = Vec::new();
        out.extend(self.execute(Command::FetchGenres).await);
        out.extend(self.execute(Command::FetchList { append: false }).await);
        out
    }

    pub async fn handle(&mut self, event: AppEvent) -> Vec<Render> {
        let commands = reduce(&mut self.state, &event);
        let mut out = Vec::new();
        for command in commands {
            out.extend(self.execute(command).await);
        }
        out
    }

    async fn execute(&mut self, command: Command) -> Vec<Render> {
        match command {
            Command::FetchList { append } => {
                match list::load_page(self.source.as_ref(), &mut self.state, append, today()).await
                {
                    Ok(Some(RenderBatch::Replaced(items))) => vec![Render::Replaced(items)],
                    Ok(Some(RenderBatch::Appended(items))) => vec![Render::Appended(items)],
                    Ok(None) => Vec::new(),
                    Err(e) => vec![Render::LoadFailed(e.to_string())],
                }
            }

            Command::FetchGenres => match self.source.genre_list(&self.state.language).await {
                Ok(genres) => {
                    self.genres = genres.clone();
                    vec![Render::Genres(genres)]
                }
                Err(e) => {
                    // Degraded filter labels, not an error state.
                    warn!(error = %e, "genre taxonomy unavailable");
                    self.genres.clear();
                    Vec::new()
                }
            },

            Command::ShowFavorites => match favorites::list(self.store.as_ref()) {
                Ok(entries) => vec![Render::Favorites(entries)],
                Err(e) => vec![Render::LoadFailed(e.to_string())],
            },

            Command::OpenDetail { id, kind } => {
                let generation = self.detail_generation.fetch_add(1, Ordering::SeqCst) + 1;

                match detail::load_detail(self.source.as_ref(), kind, id, &self.state.language)
                    .await
                {
                    Ok(view) => {
                        let favorite = favorites::contains(self.store.as_ref(), id, kind)
                            .unwrap_or_else(|e| {
                                warn!(error = %e, "could not read favorite state");
                                false
                            });
                        // Detail renders now; similar titles follow on the
                        // background channel once their fetch completes.
                        self.spawn_similar(kind, id, generation);
                        vec![Render::Detail {
                            view: Box::new(view),
                            favorite,
                        }]
                    }
                    Err(e) => vec![Render::LoadFailed(e.to_string())],
                }
            }

            Command::PersistLanguage(language) => {
                if let Err(e) = prefs::set_language(self.store.as_ref(), &language) {
                    warn!(error = %e, "could not persist language preference");
                }
                Vec::new()
            }

            Command::ToggleFavorite {
                id,
                kind,
                title,
                poster_url,
            } => match favorites::toggle(self.store.as_ref(), id, kind, &title, &poster_url) {
                Ok(favorite) => vec![Render::FavoriteState { id, kind, favorite }],
                Err(e) => vec![Render::LoadFailed(e.to_string())],
            },

            Command::ToggleTheme => {
                self.theme = self.theme.toggled();
                if let Err(e) = prefs::set_theme(self.store.as_ref(), self.theme) {
                    warn!(error = %e, "could not persist theme preference");
                }
                vec![Render::Theme(self.theme)]
            }
        }
    }

    /// Fetch similar titles for the detail view opened under `generation`,
    /// off the session's critical path. Nothing is sent when the fetch fails,
    /// nothing came back, or another detail view has replaced this one by the
    /// time the result arrives.
    fn spawn_similar(&self, kind: MediaKind, id: u64, generation: u64) {
        let source = Arc::clone(&self.source);
        let current = Arc::clone(&self.detail_generation);
        let sender = self.background.clone();
        let language = self.state.language.clone();

        tokio::spawn(async move {
            let items = match detail::load_similar(source.as_ref(), kind, id, &language).await {
                Ok(items) => items,
                Err(e) => {
                    warn!(id, %kind, error = %e, "similar titles unavailable");
                    return;
                }
            };

            if generation != current.load(Ordering::SeqCst) || items.is_empty() {
                return;
            }
            // The receiver may be gone on shutdown; nothing to do then.
            let _ = sender.send(Render::Similar(items));
        });
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
