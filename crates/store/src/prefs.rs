//! Display preferences: selected language and theme.

use serde::{Deserialize, Serialize};

use crate::{BlobStore, StoreError};

const LANGUAGE_KEY: &str = "language";
const THEME_KEY: &str = "theme";

pub const DEFAULT_LANGUAGE: &str = "ja-JP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Selected display language, defaulting when nothing is stored.
pub fn language(store: &dyn BlobStore) -> Result<String, StoreError> {
    Ok(store
        .get(LANGUAGE_KEY)?
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()))
}

pub fn set_language(store: &dyn BlobStore, language: &str) -> Result<(), StoreError> {
    store.set(LANGUAGE_KEY, language)
}

/// Stored theme; an unrecognized value falls back to the default.
pub fn theme(store: &dyn BlobStore) -> Result<Theme, StoreError> {
    let theme = match store.get(THEME_KEY)?.as_deref() {
        Some("light") => Theme::Light,
        Some("dark") | None => Theme::Dark,
        Some(_) => Theme::default(),
    };
    Ok(theme)
}

pub fn set_theme(store: &dyn BlobStore, theme: Theme) -> Result<(), StoreError> {
    store.set(THEME_KEY, theme.as_str())
}
