//! List aggregator: one page load per call, with business filters and
//! cross-page dedup.

use std::collections::HashSet;

use chrono::NaiveDate;
use kinema_core::{MediaItem, MediaKind, Tab};
use kinema_metadata::provider::MediaSource;
use kinema_metadata::FetchError;

use crate::state::ListState;

/// What changed in the view after a page load. Append reports only the
/// incremental slice so already-rendered items are not redrawn.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderBatch {
    Replaced(Vec<MediaItem>),
    Appended(Vec<MediaItem>),
}

/// Load one page for the current query and fold it into the state.
///
/// Returns `Ok(None)` when nothing was done: a load is already in flight
/// (the re-entrancy guard) or the view has no network query. The loading
/// flag is cleared on both success and failure.
pub async fn load_page(
    source: &dyn MediaSource,
    state: &mut ListState,
    append: bool,
    today: NaiveDate,
) -> Result<Option<RenderBatch>, FetchError> {
    if state.loading {
        return Ok(None);
    }
    let Some(query) = state.query() else {
        return Ok(None);
    };

    state.loading = true;
    let result = source.fetch_list(&query, &state.language).await;
    state.loading = false;

    let page = result?;
    state.total_pages = page.total_pages;

    let filtered = apply_filters(page.items, state.tab, today);

    let batch = if append {
        let existing: HashSet<u64> = state.items.iter().map(|m| m.id).collect();
        let fresh: Vec<MediaItem> = filtered
            .into_iter()
            .filter(|m| !existing.contains(&m.id))
            .collect();
        state.items.extend(fresh.iter().cloned());
        RenderBatch::Appended(fresh)
    } else {
        let mut seen = HashSet::new();
        let deduped: Vec<MediaItem> = filtered
            .into_iter()
            .filter(|m| seen.insert(m.id))
            .collect();
        state.items = deduped.clone();
        RenderBatch::Replaced(deduped)
    };

    Ok(Some(batch))
}

/// Business filters, in order: drop person entries and anything without an
/// image (multi search is polymorphic); on the upcoming tab keep only items
/// releasing today or later.
fn apply_filters(items: Vec<MediaItem>, tab: Tab, today: NaiveDate) -> Vec<MediaItem> {
    let mut kept: Vec<MediaItem> = items
        .into_iter()
        .filter(|m| {
            m.kind != MediaKind::Person
                && (m.poster_path.is_some() || m.backdrop_path.is_some())
        })
        .collect();

    if tab == Tab::Upcoming {
        kept.retain(|m| m.release_date.is_some_and(|d| d >= today));
    }

    kept
}
