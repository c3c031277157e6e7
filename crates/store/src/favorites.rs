//! Favorites persistence.
//!
//! The whole list is stored as one JSON blob and rewritten on every mutation.
//! A missing or malformed blob reads as empty; that path is never fatal.

use kinema_core::MediaKind;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{BlobStore, StoreError};

const FAVORITES_KEY: &str = "favorites";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub poster_url: String,
    pub added_at: i64,
}

/// All favorites, most recently added first.
pub fn list(store: &dyn BlobStore) -> Result<Vec<FavoriteEntry>, StoreError> {
    let Some(raw) = store.get(FAVORITES_KEY)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            warn!(error = %e, "malformed favorites blob, treating as empty");
            Ok(Vec::new())
        }
    }
}

pub fn contains(store: &dyn BlobStore, id: u64, kind: MediaKind) -> Result<bool, StoreError> {
    Ok(list(store)?.iter().any(|f| f.id == id && f.kind == kind))
}

/// Toggle membership for `(id, kind)` and persist the updated list in a
/// single write. Returns the new membership state. Takes raw scalars so it
/// can be driven from rendered-element callbacks that hold no live records.
pub fn toggle(
    store: &dyn BlobStore,
    id: u64,
    kind: MediaKind,
    title: &str,
    poster_url: &str,
) -> Result<bool, StoreError> {
    let mut entries = list(store)?;

    let added = match entries.iter().position(|f| f.id == id && f.kind == kind) {
        Some(idx) => {
            entries.remove(idx);
            false
        }
        None => {
            entries.insert(
                0,
                FavoriteEntry {
                    id,
                    kind,
                    title: title.to_string(),
                    poster_url: poster_url.to_string(),
                    added_at: chrono::Utc::now().timestamp(),
                },
            );
            true
        }
    };

    let raw = serde_json::to_string(&entries).map_err(|e| {
        StoreError::Io(std::io::Error::other(e))
    })?;
    store.set(FAVORITES_KEY, &raw)?;

    Ok(added)
}
