//! View state for the list grid.
//!
//! The state is an explicit value mutated only by [`crate::event::reduce`] and
//! the list aggregator; rendering observes the outputs, never the state.

use kinema_core::{MediaItem, Tab};
use kinema_metadata::provider::ListQuery;
use kinema_store::prefs::DEFAULT_LANGUAGE;

/// Infinite scroll fires within this distance of the document bottom.
pub const SCROLL_THRESHOLD: f64 = 500.0;

#[derive(Debug, Clone)]
pub struct ListState {
    pub tab: Tab,
    pub page: u32,
    pub total_pages: u32,
    pub search: Option<String>,
    pub genre: Option<u32>,
    pub language: String,
    pub loading: bool,
    /// Items currently in the view, unique by id.
    pub items: Vec<MediaItem>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            tab: Tab::Popular,
            page: 1,
            total_pages: 1,
            search: None,
            genre: None,
            language: DEFAULT_LANGUAGE.to_string(),
            loading: false,
            items: Vec::new(),
        }
    }
}

impl ListState {
    /// Resolve the one query this state maps to. Priority is a hard contract:
    /// search beats the TV tab beats the genre filter beats the tab's
    /// category endpoint. The favorites view is local and resolves to `None`.
    pub fn query(&self) -> Option<ListQuery> {
        if let Some(text) = &self.search {
            return Some(ListQuery::Search {
                text: text.clone(),
                page: self.page,
            });
        }

        match self.tab {
            Tab::Favorites => None,
            Tab::Tv => Some(ListQuery::DiscoverTv {
                genre: self.genre,
                page: self.page,
            }),
            _ => match self.genre {
                Some(genre) => Some(ListQuery::DiscoverMovie {
                    genre,
                    page: self.page,
                }),
                None => Some(ListQuery::MovieCategory {
                    category: self.tab,
                    page: self.page,
                }),
            },
        }
    }

    /// Move to the next page if one exists. Never advances past the total
    /// reported by the source.
    pub fn advance_page(&mut self) -> bool {
        if self.page < self.total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn has_more_pages(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Whether a scroll position is close enough to the bottom to ask for the
/// next page.
pub fn near_bottom(scroll_y: f64, viewport: f64, doc_height: f64) -> bool {
    scroll_y + viewport >= doc_height - SCROLL_THRESHOLD
}
