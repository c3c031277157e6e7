//! UI events and the pure reducer mapping them onto state transitions.
//!
//! Events carry typed payloads (id, kind) rather than values encoded into
//! rendered markup. The reducer mutates only [`ListState`] and returns the
//! side effects for the session to execute; it performs no I/O itself.

use kinema_core::{MediaKind, Tab};

use crate::state::ListState;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    TabSelected(Tab),
    SearchSubmitted(String),
    GenreChanged(Option<u32>),
    LanguageChanged(String),
    LoadMoreRequested,
    ScrolledNearBottom,
    ItemSelected {
        id: u64,
        kind: MediaKind,
    },
    FavoriteToggled {
        id: u64,
        kind: MediaKind,
        title: String,
        poster_url: String,
    },
    ThemeToggled,
    RetryRequested,
}

/// An effect the session executes after a reduction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchList { append: bool },
    FetchGenres,
    ShowFavorites,
    OpenDetail { id: u64, kind: MediaKind },
    PersistLanguage(String),
    ToggleFavorite {
        id: u64,
        kind: MediaKind,
        title: String,
        poster_url: String,
    },
    ToggleTheme,
}

pub fn reduce(state: &mut ListState, event: &AppEvent) -> Vec<Command> {
    match event {
        AppEvent::TabSelected(tab) => {
            state.tab = *tab;
            state.page = 1;
            state.search = None;
            if *tab == Tab::Favorites {
                vec![Command::ShowFavorites]
            } else {
                vec![Command::FetchList { append: false }]
            }
        }

        AppEvent::SearchSubmitted(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Vec::new();
            }
            state.search = Some(text.to_string());
            state.page = 1;
            vec![Command::FetchList { append: false }]
        }

        AppEvent::GenreChanged(genre) => {
            state.genre = *genre;
            state.page = 1;
            if state.tab == Tab::Favorites && state.search.is_none() {
                Vec::new()
            } else {
                vec![Command::FetchList { append: false }]
            }
        }

        AppEvent::LanguageChanged(language) => {
            state.language = language.clone();
            state.page = 1;
            let mut commands = vec![
                Command::PersistLanguage(language.clone()),
                // Genre labels depend on the display language.
                Command::FetchGenres,
            ];
            if state.tab == Tab::Favorites && state.search.is_none() {
                commands.push(Command::ShowFavorites);
            } else {
                commands.push(Command::FetchList { append: false });
            }
            commands
        }

        AppEvent::LoadMoreRequested | AppEvent::ScrolledNearBottom => {
            if state.loading || state.query().is_none() {
                return Vec::new();
            }
            if state.advance_page() {
                vec![Command::FetchList { append: true }]
            } else {
                Vec::new()
            }
        }

        AppEvent::ItemSelected { id, kind } => vec![Command::OpenDetail {
            id: *id,
            kind: *kind,
        }],

        AppEvent::FavoriteToggled {
            id,
            kind,
            title,
            poster_url,
        } => vec![Command::ToggleFavorite {
            id: *id,
            kind: *kind,
            title: title.clone(),
            poster_url: poster_url.clone(),
        }],

        AppEvent::ThemeToggled => vec![Command::ToggleTheme],

        AppEvent::RetryRequested => {
            if state.query().is_some() {
                vec![Command::FetchList { append: false }]
            } else {
                vec![Command::ShowFavorites]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_switch_resets_page_and_clears_search() {
        let mut state = ListState {
            tab: Tab::Popular,
            page: 4,
            total_pages: 9,
            search: Some("dune".to_string()),
            ..Default::default()
        };

        let commands = reduce(&mut state, &AppEvent::TabSelected(Tab::Upcoming));

        assert_eq!(state.tab, Tab::Upcoming);
        assert_eq!(state.page, 1);
        assert_eq!(state.search, None);
        assert_eq!(commands, vec![Command::FetchList { append: false }]);
    }

    #[test]
    fn favorites_tab_shows_local_list() {
        let mut state = ListState::default();
        let commands = reduce(&mut state, &AppEvent::TabSelected(Tab::Favorites));
        assert_eq!(commands, vec![Command::ShowFavorites]);
    }

    #[test]
    fn blank_search_is_a_no_op() {
        let mut state = ListState {
            page: 3,
            ..Default::default()
        };
        assert!(reduce(&mut state, &AppEvent::SearchSubmitted("   ".to_string())).is_empty());
        assert_eq!(state.page, 3);
        assert_eq!(state.search, None);
    }

    #[test]
    fn search_resets_page_and_sets_query() {
        let mut state = ListState {
            page: 3,
            total_pages: 7,
            ..Default::default()
        };
        let commands = reduce(&mut state, &AppEvent::SearchSubmitted(" Dune ".to_string()));
        assert_eq!(state.search.as_deref(), Some("Dune"));
        assert_eq!(state.page, 1);
        assert_eq!(commands, vec![Command::FetchList { append: false }]);
    }

    #[test]
    fn genre_change_resets_page() {
        let mut state = ListState {
            page: 5,
            total_pages: 9,
            ..Default::default()
        };
        let commands = reduce(&mut state, &AppEvent::GenreChanged(Some(28)));
        assert_eq!(state.genre, Some(28));
        assert_eq!(state.page, 1);
        assert_eq!(commands, vec![Command::FetchList { append: false }]);
    }

    #[test]
    fn language_change_refreshes_genres_then_reloads() {
        let mut state = ListState {
            page: 2,
            total_pages: 4,
            ..Default::default()
        };
        let commands = reduce(
            &mut state,
            &AppEvent::LanguageChanged("en-US".to_string()),
        );

        assert_eq!(state.language, "en-US");
        assert_eq!(state.page, 1);
        assert_eq!(
            commands,
            vec![
                Command::PersistLanguage("en-US".to_string()),
                Command::FetchGenres,
                Command::FetchList { append: false },
            ]
        );
    }

    #[test]
    fn load_more_is_gated_by_loading_flag() {
        let mut state = ListState {
            page: 1,
            total_pages: 5,
            loading: true,
            ..Default::default()
        };
        assert!(reduce(&mut state, &AppEvent::ScrolledNearBottom).is_empty());
        assert_eq!(state.page, 1, "state unchanged while a load is in flight");
    }

    #[test]
    fn load_more_stops_at_last_page() {
        let mut state = ListState {
            page: 5,
            total_pages: 5,
            ..Default::default()
        };
        assert!(reduce(&mut state, &AppEvent::LoadMoreRequested).is_empty());
        assert_eq!(state.page, 5);
    }

    #[test]
    fn load_more_advances_and_appends() {
        let mut state = ListState {
            page: 1,
            total_pages: 3,
            ..Default::default()
        };
        let commands = reduce(&mut state, &AppEvent::LoadMoreRequested);
        assert_eq!(state.page, 2);
        assert_eq!(commands, vec![Command::FetchList { append: true }]);
    }

    #[test]
    fn scroll_does_nothing_on_favorites_view() {
        let mut state = ListState {
            tab: Tab::Favorites,
            page: 1,
            total_pages: 5,
            ..Default::default()
        };
        assert!(reduce(&mut state, &AppEvent::ScrolledNearBottom).is_empty());
    }

    #[test]
    fn item_selection_carries_typed_identity() {
        let mut state = ListState::default();
        let commands = reduce(
            &mut state,
            &AppEvent::ItemSelected {
                id: 27205,
                kind: MediaKind::Movie,
            },
        );
        assert_eq!(
            commands,
            vec![Command::OpenDetail {
                id: 27205,
                kind: MediaKind::Movie,
            }]
        );
    }
}
