use std::sync::Arc;

use anyhow::Context;
use kinema_app::event::AppEvent;
use kinema_app::render;
use kinema_app::session::{Render, Session};
use kinema_app::state::near_bottom;
use kinema_core::{MediaKind, Tab};
use kinema_metadata::images;
use kinema_metadata::tmdb::TmdbClient;
use kinema_store::FileStore;
use tokio::io::AsyncBufReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Identity of the most recently opened detail view, kept so `fav` can
/// toggle with scalars only.
struct LastDetail {
    id: u64,
    kind: MediaKind,
    title: String,
    poster_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let api_key = std::env::var("KINEMA_API_KEY").context("KINEMA_API_KEY must be set")?;
    let data_dir = std::env::var("KINEMA_DATA_DIR").unwrap_or_else(|_| ".kinema".to_string());
    info!(data_dir = %data_dir, "opening local store");

    let store = Arc::new(FileStore::new(&data_dir).context("failed to open data dir")?);
    let source = Arc::new(TmdbClient::new(api_key));

    let (mut session, mut background) =
        Session::new(source, store).context("failed to load preferences")?;
    let mut last_detail: Option<LastDetail> = None;

    for output in session.startup().await {
        render::print(&output);
    }
    print_help();

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break,
            },
            // Late-arriving renders, e.g. similar titles for an open detail
            // view, surface between commands.
            Some(output) = background.recv() => {
                render::print(&output);
                continue;
            }
        };

        let Some(event) = parse_command(line.trim(), &last_detail) else {
            continue;
        };
        let event = match event {
            Parsed::Quit => break,
            Parsed::Event(event) => event,
        };

        for output in session.handle(event).await {
            if let Render::Detail { view, .. } = &output {
                last_detail = Some(LastDetail {
                    id: view.record.item.id,
                    kind: view.record.item.kind,
                    title: view.record.item.title.clone(),
                    poster_url: images::poster_url(view.record.item.poster_path.as_deref()),
                });
            }
            render::print(&output);
        }
    }

    Ok(())
}

enum Parsed {
    Event(AppEvent),
    Quit,
}

fn parse_command(line: &str, last_detail: &Option<LastDetail>) -> Option<Parsed> {
    let (command, rest) = match line.split_once(' ') {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    let event = match command {
        "" => return None,
        "quit" | "exit" => return Some(Parsed::Quit),
        "help" => {
            print_help();
            return None;
        }
        "tab" => match Tab::parse(rest) {
            Some(tab) => AppEvent::TabSelected(tab),
            None => {
                println!("unknown tab: {rest}");
                return None;
            }
        },
        "search" => AppEvent::SearchSubmitted(rest.to_string()),
        "genre" => match rest {
            "clear" => AppEvent::GenreChanged(None),
            _ => match rest.parse() {
                Ok(id) => AppEvent::GenreChanged(Some(id)),
                Err(_) => {
                    println!("usage: genre <id>|clear");
                    return None;
                }
            },
        },
        "lang" => AppEvent::LanguageChanged(rest.to_string()),
        "theme" => AppEvent::ThemeToggled,
        "more" => AppEvent::LoadMoreRequested,
        "retry" => AppEvent::RetryRequested,
        "scroll" => match parse_scroll(rest) {
            Some(event) => event?,
            None => {
                println!("usage: scroll <y> <viewport> <height>");
                return None;
            }
        },
        "open" => match parse_identity(rest) {
            Some((kind, id)) => AppEvent::ItemSelected { id, kind },
            None => {
                println!("usage: open <movie|tv> <id>");
                return None;
            }
        },
        "fav" => match last_detail {
            Some(detail) => AppEvent::FavoriteToggled {
                id: detail.id,
                kind: detail.kind,
                title: detail.title.clone(),
                poster_url: detail.poster_url.clone(),
            },
            None => {
                println!("open a detail view first");
                return None;
            }
        },
        _ => {
            println!("unknown command: {command} (try `help`)");
            return None;
        }
    };

    Some(Parsed::Event(event))
}

/// `scroll <y> <viewport> <height>` reports a scroll position; the event only
/// fires within the near-bottom threshold. `None` means malformed input,
/// `Some(None)` a position still far from the bottom.
fn parse_scroll(rest: &str) -> Option<Option<AppEvent>> {
    let mut parts = rest.split_whitespace();
    let scroll_y: f64 = parts.next()?.parse().ok()?;
    let viewport: f64 = parts.next()?.parse().ok()?;
    let doc_height: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some(near_bottom(scroll_y, viewport, doc_height).then_some(AppEvent::ScrolledNearBottom))
}

fn parse_identity(rest: &str) -> Option<(MediaKind, u64)> {
    let (kind, id) = rest.split_once(' ')?;
    let kind = MediaKind::parse(kind)?;
    if kind == MediaKind::Person {
        return None;
    }
    Some((kind, id.trim().parse().ok()?))
}

fn print_help() {
    println!("commands:");
    println!("  tab <popular|top_rated|upcoming|now_playing|tv|favorites>");
    println!("  search <text>       multi-type search (wins over tab/genre)");
    println!("  genre <id>|clear    filter by genre id");
    println!("  lang <tag>          display language, e.g. ja-JP, en-US");
    println!("  more                load the next page");
    println!("  scroll <y> <viewport> <height>  report a scroll position");
    println!("  open <movie|tv> <id>  show details");
    println!("  fav                 toggle favorite for the open detail view");
    println!("  theme | retry | help | quit");
}
