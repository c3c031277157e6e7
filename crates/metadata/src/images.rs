//! Image URL composition.
//!
//! The API returns bare paths; full URLs are a fixed base plus a width bucket
//! chosen per use-case plus the path.

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/342x513?text=No+Image";
pub const PLACEHOLDER_PROFILE: &str = "https://via.placeholder.com/185x278?text=No+Photo";

/// Grid/modal poster, w342. Falls back to a placeholder.
pub fn poster_url(path: Option<&str>) -> String {
    match path {
        Some(p) => format!("{IMAGE_BASE}/w342{p}"),
        None => PLACEHOLDER_POSTER.to_string(),
    }
}

/// Modal backdrop, w1280. No placeholder; the section is omitted instead.
pub fn backdrop_url(path: Option<&str>) -> Option<String> {
    path.map(|p| format!("{IMAGE_BASE}/w1280{p}"))
}

/// Cast photo, w185. Falls back to a placeholder.
pub fn profile_url(path: Option<&str>) -> String {
    match path {
        Some(p) => format!("{IMAGE_BASE}/w185{p}"),
        None => PLACEHOLDER_PROFILE.to_string(),
    }
}

/// Similar-title thumbnail, w185. Callers only pass items that have a poster.
pub fn thumb_url(path: &str) -> String {
    format!("{IMAGE_BASE}/w185{path}")
}

/// Watch-provider logo, w92.
pub fn logo_url(path: Option<&str>) -> Option<String> {
    path.map(|p| format!("{IMAGE_BASE}/w92{p}"))
}
