//! Plain-text rendering of session outputs.
//!
//! The terminal stands in for the grid/modal surface; everything here is
//! presentation only.

use chrono::NaiveDate;
use kinema_core::MediaItem;
use kinema_metadata::images;
use kinema_metadata::{CastMember, StreamingProvider};
use kinema_store::favorites::FavoriteEntry;

use crate::detail::DetailView;
use crate::session::Render;

pub fn print(render: &Render) {
    match render {
        Render::Replaced(items) => {
            if items.is_empty() {
                println!("no results found");
            } else {
                print_items(items);
            }
        }
        Render::Appended(items) => print_items(items),
        Render::Favorites(entries) => print_favorites(entries),
        Render::Genres(genres) => {
            let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
            println!("genres: {}", names.join(", "));
        }
        Render::Detail { view, favorite } => print_detail(view, *favorite),
        Render::Similar(items) => {
            println!("similar:");
            for item in items {
                println!("  {}", similar_line(item));
            }
        }
        Render::FavoriteState { id, kind, favorite } => {
            if *favorite {
                println!("added {kind} {id} to favorites");
            } else {
                println!("removed {kind} {id} from favorites");
            }
        }
        Render::Theme(theme) => println!("theme: {}", theme.as_str()),
        Render::LoadFailed(message) => println!("load failed: {message} (try `retry`)"),
    }
}

fn print_items(items: &[MediaItem]) {
    let today = chrono::Local::now().date_naive();
    for item in items {
        println!("{}", item_line(item, today));
    }
}

fn item_line(item: &MediaItem, today: NaiveDate) -> String {
    let year = item
        .release_date
        .map(|d| d.format("%Y").to_string())
        .unwrap_or_else(|| "----".to_string());
    let rating = item
        .rating
        .map(|r| format!("{r:.1}"))
        .unwrap_or_else(|| "N/A".to_string());
    let mut line = format!("[{} {}] {} ({year}) *{rating}", item.kind, item.id, item.title);
    if let Some(badge) = countdown(item.release_date, today) {
        line.push_str("  ");
        line.push_str(&badge);
    }
    line
}

/// Badge for titles releasing within the next year.
fn countdown(release: Option<NaiveDate>, today: NaiveDate) -> Option<String> {
    let days = (release? - today).num_days();
    (days > 0 && days <= 365).then(|| format!("Releases in {days} days"))
}

fn cast_line(member: &CastMember) -> String {
    let photo = images::profile_url(member.profile_path.as_deref());
    match &member.character {
        Some(character) => format!("{} as {character} ({photo})", member.name),
        None => format!("{} ({photo})", member.name),
    }
}

fn provider_line(provider: &StreamingProvider) -> String {
    match images::logo_url(provider.logo_path.as_deref()) {
        Some(logo) => format!("{} ({logo})", provider.name),
        None => provider.name.clone(),
    }
}

fn similar_line(item: &MediaItem) -> String {
    let thumb = match item.poster_path.as_deref() {
        Some(path) => images::thumb_url(path),
        None => images::PLACEHOLDER_POSTER.to_string(),
    };
    format!("[{} {}] {} ({thumb})", item.kind, item.id, item.title)
}

fn print_favorites(entries: &[FavoriteEntry]) {
    if entries.is_empty() {
        println!("no favorites yet; add them from a detail view with `fav`");
        return;
    }
    for entry in entries {
        println!("[{} {}] {}", entry.kind, entry.id, entry.title);
    }
}

fn print_detail(view: &DetailView, favorite: bool) {
    let record = &view.record;
    println!("== {} ==", record.item.title);
    if let Some(tagline) = &record.tagline {
        println!("\"{tagline}\"");
    }

    let mut stats = Vec::new();
    if let Some(rating) = record.item.rating {
        stats.push(format!("*{rating:.1}"));
    }
    if let Some(date) = record.item.release_date {
        stats.push(date.format("%Y-%m-%d").to_string());
    }
    if let Some(runtime) = record.runtime_minutes {
        stats.push(format!("{runtime} min"));
    }
    if !stats.is_empty() {
        println!("{}", stats.join(" | "));
    }

    if !record.genres.is_empty() {
        let names: Vec<&str> = record.genres.iter().map(|g| g.name.as_str()).collect();
        println!("[{}]", names.join("] ["));
    }

    println!("favorite: {}", if favorite { "yes" } else { "no" });
    println!("{}", record.overview);

    if let Some(key) = &record.trailer_key {
        println!("trailer: https://www.youtube.com/watch?v={key}");
    }

    if let Some(providers) = &record.watch_providers {
        if !providers.is_empty() {
            let lines: Vec<String> = providers
                .flatrate
                .iter()
                .chain(&providers.rent)
                .chain(&providers.buy)
                .map(provider_line)
                .collect();
            println!("watch on: {}", lines.join(", "));
        }
    }

    if !record.cast.is_empty() {
        println!("cast:");
        for member in &record.cast {
            println!("  {}", cast_line(member));
        }
    }

    for review in &record.reviews {
        let excerpt: String = review.content.chars().take(300).collect();
        match review.rating {
            Some(rating) => println!("review by {} ({rating}/10): {excerpt}", review.author),
            None => println!("review by {}: {excerpt}", review.author),
        }
    }

    if let Some(backdrop) = images::backdrop_url(record.item.backdrop_path.as_deref()) {
        println!("backdrop: {backdrop}");
    }
    println!("poster: {}", images::poster_url(record.item.poster_path.as_deref()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinema_core::MediaKind;

    fn movie(release: Option<&str>) -> MediaItem {
        MediaItem {
            id: 1,
            kind: MediaKind::Movie,
            title: "Movie".to_string(),
            release_date: release.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            poster_path: Some("/p.jpg".to_string()),
            backdrop_path: None,
            rating: Some(7.0),
            overview: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn countdown_covers_the_next_year_only() {
        assert_eq!(
            countdown(NaiveDate::from_ymd_opt(2026, 3, 31), today()),
            Some("Releases in 30 days".to_string())
        );
        // Already out, releasing today, releasing beyond a year, undated.
        assert_eq!(countdown(NaiveDate::from_ymd_opt(2026, 2, 1), today()), None);
        assert_eq!(countdown(NaiveDate::from_ymd_opt(2026, 3, 1), today()), None);
        assert_eq!(countdown(NaiveDate::from_ymd_opt(2027, 3, 2), today()), None);
        assert_eq!(countdown(None, today()), None);
    }

    #[test]
    fn upcoming_item_line_carries_the_badge() {
        let line = item_line(&movie(Some("2026-03-31")), today());
        assert!(line.ends_with("Releases in 30 days"), "got: {line}");

        let line = item_line(&movie(Some("2020-01-01")), today());
        assert!(!line.contains("Releases in"), "got: {line}");
    }

    #[test]
    fn cast_line_links_the_photo() {
        let member = CastMember {
            name: "Toshiro Mifune".to_string(),
            character: Some("Kikuchiyo".to_string()),
            profile_path: Some("/mifune.jpg".to_string()),
        };
        assert_eq!(
            cast_line(&member),
            "Toshiro Mifune as Kikuchiyo (https://image.tmdb.org/t/p/w185/mifune.jpg)"
        );

        let unphotographed = CastMember {
            name: "Unknown".to_string(),
            character: None,
            profile_path: None,
        };
        assert!(cast_line(&unphotographed).contains(images::PLACEHOLDER_PROFILE));
    }

    #[test]
    fn provider_line_links_the_logo_when_present() {
        let netflix = StreamingProvider {
            name: "Netflix".to_string(),
            logo_path: Some("/n.png".to_string()),
        };
        assert_eq!(
            provider_line(&netflix),
            "Netflix (https://image.tmdb.org/t/p/w92/n.png)"
        );

        let bare = StreamingProvider {
            name: "Hulu".to_string(),
            logo_path: None,
        };
        assert_eq!(provider_line(&bare), "Hulu");
    }

    #[test]
    fn similar_line_links_the_thumbnail() {
        let line = similar_line(&movie(None));
        assert!(
            line.contains("https://image.tmdb.org/t/p/w185/p.jpg"),
            "got: {line}"
        );
    }
}
