//! TMDB (The Movie Database) client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use chrono::NaiveDate;
use kinema_core::{Genre, MediaItem, MediaKind};
use serde_json::Value;
use tracing::debug;

use crate::provider::{ListQuery, MediaSource};
use crate::{
    CastMember, DetailDocument, FetchError, ListPage, ProviderMap, Review, StreamingProvider,
    VideoEntry, WatchProviders,
};

const BASE_URL: &str = "https://api.themoviedb.org/3";

/// Cast entries kept per detail view.
const CAST_LIMIT: usize = 6;

pub struct TmdbClient {
    api_key: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
        language: &str,
    ) -> Result<Value, FetchError> {
        let all_params = merged_params(params, &self.api_key, language);

        let url = format!("{BASE_URL}{path}");
        debug!(url = %url, language, "tmdb request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        resp.json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Merge caller params with the credential and language tag. Caller values
/// never override either one.
fn merged_params<'a>(
    params: &[(&'a str, &'a str)],
    api_key: &'a str,
    language: &'a str,
) -> Vec<(&'a str, &'a str)> {
    let mut all: Vec<(&str, &str)> = params
        .iter()
        .filter(|(k, _)| *k != "api_key" && *k != "language")
        .copied()
        .collect();
    all.push(("api_key", api_key));
    all.push(("language", language));
    all
}

#[async_trait::async_trait]
impl MediaSource for TmdbClient {
    async fn fetch_list(
        &self,
        query: &ListQuery,
        language: &str,
    ) -> Result<ListPage, FetchError> {
        let page_str = query.page().to_string();

        let (data, hint) = match query {
            ListQuery::Search { text, page: _ } => {
                let data = self
                    .get_json(
                        "/search/multi",
                        &[("query", text.as_str()), ("page", page_str.as_str())],
                        language,
                    )
                    .await?;
                (data, MediaKind::Movie)
            }
            ListQuery::DiscoverTv { genre, page: _ } => {
                let genre_str = genre.map(|g| g.to_string());
                let mut params = vec![("page", page_str.as_str())];
                if let Some(ref g) = genre_str {
                    params.push(("with_genres", g));
                }
                let data = self.get_json("/discover/tv", &params, language).await?;
                (data, MediaKind::Tv)
            }
            ListQuery::DiscoverMovie { genre, page: _ } => {
                let genre_str = genre.to_string();
                let data = self
                    .get_json(
                        "/discover/movie",
                        &[
                            ("page", page_str.as_str()),
                            ("with_genres", genre_str.as_str()),
                            ("sort_by", "popularity.desc"),
                        ],
                        language,
                    )
                    .await?;
                (data, MediaKind::Movie)
            }
            ListQuery::MovieCategory { category, page: _ } => {
                // Query construction only produces movie-category tabs here.
                let segment = category.movie_category().unwrap_or("popular");
                let data = self
                    .get_json(
                        &format!("/movie/{segment}"),
                        &[("page", page_str.as_str())],
                        language,
                    )
                    .await?;
                (data, MediaKind::Movie)
            }
        };

        Ok(parse_list_page(&data, hint))
    }

    async fn genre_list(&self, language: &str) -> Result<Vec<Genre>, FetchError> {
        let data = self.get_json("/genre/movie/list", &[], language).await?;
        Ok(parse_genres(&data))
    }

    async fn fetch_detail(
        &self,
        kind: MediaKind,
        id: u64,
        language: &str,
    ) -> Result<DetailDocument, FetchError> {
        let data = self
            .get_json(
                &format!("/{kind}/{id}"),
                &[("append_to_response", "credits,videos")],
                language,
            )
            .await?;
        Ok(parse_detail_document(&data, kind))
    }

    async fn fetch_videos(
        &self,
        kind: MediaKind,
        id: u64,
        language: &str,
    ) -> Result<Vec<VideoEntry>, FetchError> {
        let data = self
            .get_json(&format!("/{kind}/{id}/videos"), &[], language)
            .await?;
        Ok(parse_videos(&data))
    }

    async fn fetch_watch_providers(
        &self,
        kind: MediaKind,
        id: u64,
        language: &str,
    ) -> Result<ProviderMap, FetchError> {
        let data = self
            .get_json(&format!("/{kind}/{id}/watch/providers"), &[], language)
            .await?;
        Ok(parse_providers_map(&data))
    }

    async fn fetch_reviews(
        &self,
        kind: MediaKind,
        id: u64,
        language: &str,
    ) -> Result<Vec<Review>, FetchError> {
        let data = self
            .get_json(&format!("/{kind}/{id}/reviews"), &[], language)
            .await?;
        Ok(parse_reviews(&data))
    }

    async fn fetch_similar(
        &self,
        kind: MediaKind,
        id: u64,
        language: &str,
    ) -> Result<Vec<MediaItem>, FetchError> {
        let data = self
            .get_json(&format!("/{kind}/{id}/similar"), &[], language)
            .await?;
        Ok(parse_list_page(&data, kind).items)
    }
}

fn parse_date(v: &Value, field: &str) -> Option<NaiveDate> {
    v[field]
        .as_str()
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

fn non_empty_str(v: &Value, field: &str) -> Option<String> {
    v[field]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse one list entry. The `media_type` field wins when present (multi
/// search is polymorphic); otherwise a `first_air_date` implies TV, else the
/// endpoint hint applies.
pub fn parse_media_item(v: &Value, hint: MediaKind) -> Option<MediaItem> {
    let id = v["id"].as_u64()?;

    let kind = v["media_type"]
        .as_str()
        .and_then(MediaKind::parse)
        .unwrap_or_else(|| {
            if v["first_air_date"].as_str().is_some_and(|s| !s.is_empty()) {
                MediaKind::Tv
            } else {
                hint
            }
        });

    let title = v["title"]
        .as_str()
        .or_else(|| v["name"].as_str())
        .unwrap_or("Unknown")
        .to_string();

    Some(MediaItem {
        id,
        kind,
        title,
        release_date: parse_date(v, "release_date").or_else(|| parse_date(v, "first_air_date")),
        poster_path: non_empty_str(v, "poster_path"),
        backdrop_path: non_empty_str(v, "backdrop_path"),
        rating: v["vote_average"].as_f64(),
        overview: non_empty_str(v, "overview"),
    })
}

pub fn parse_list_page(data: &Value, hint: MediaKind) -> ListPage {
    let items = data["results"]
        .as_array()
        .map(|rs| rs.iter().filter_map(|r| parse_media_item(r, hint)).collect())
        .unwrap_or_default();

    ListPage {
        items,
        total_pages: data["total_pages"].as_u64().unwrap_or(1) as u32,
    }
}

pub fn parse_genres(data: &Value) -> Vec<Genre> {
    data["genres"]
        .as_array()
        .map(|gs| {
            gs.iter()
                .filter_map(|g| {
                    Some(Genre {
                        id: g["id"].as_u64()? as u32,
                        name: g["name"].as_str()?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn parse_detail_document(data: &Value, kind: MediaKind) -> DetailDocument {
    let item = MediaItem {
        id: data["id"].as_u64().unwrap_or(0),
        kind,
        title: data["title"]
            .as_str()
            .or_else(|| data["name"].as_str())
            .unwrap_or("Unknown")
            .to_string(),
        release_date: parse_date(data, "release_date").or_else(|| parse_date(data, "first_air_date")),
        poster_path: non_empty_str(data, "poster_path"),
        backdrop_path: non_empty_str(data, "backdrop_path"),
        rating: data["vote_average"].as_f64(),
        overview: non_empty_str(data, "overview"),
    };

    // Movies carry `runtime`; series carry per-episode run times.
    let runtime_minutes = data["runtime"]
        .as_u64()
        .or_else(|| {
            data["episode_run_time"]
                .as_array()
                .and_then(|a| a.first())
                .and_then(Value::as_u64)
        })
        .map(|r| r as u32);

    let cast = data["credits"]["cast"]
        .as_array()
        .map(|cs| {
            cs.iter()
                .take(CAST_LIMIT)
                .filter_map(|c| {
                    Some(CastMember {
                        name: c["name"].as_str()?.to_string(),
                        character: non_empty_str(c, "character"),
                        profile_path: non_empty_str(c, "profile_path"),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    DetailDocument {
        item,
        tagline: non_empty_str(data, "tagline"),
        runtime_minutes,
        genres: parse_genres(data),
        cast,
        videos: parse_videos(&data["videos"]),
    }
}

pub fn parse_videos(data: &Value) -> Vec<VideoEntry> {
    data["results"]
        .as_array()
        .map(|vs| {
            vs.iter()
                .filter_map(|v| {
                    Some(VideoEntry {
                        key: v["key"].as_str()?.to_string(),
                        site: v["site"].as_str().unwrap_or_default().to_string(),
                        kind: v["type"].as_str().unwrap_or_default().to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn parse_providers_map(data: &Value) -> ProviderMap {
    let mut map = ProviderMap::new();

    if let Some(regions) = data["results"].as_object() {
        for (region, block) in regions {
            map.insert(
                region.clone(),
                WatchProviders {
                    flatrate: parse_provider_list(&block["flatrate"]),
                    rent: parse_provider_list(&block["rent"]),
                    buy: parse_provider_list(&block["buy"]),
                },
            );
        }
    }

    map
}

fn parse_provider_list(v: &Value) -> Vec<StreamingProvider> {
    v.as_array()
        .map(|ps| {
            ps.iter()
                .filter_map(|p| {
                    Some(StreamingProvider {
                        name: p["provider_name"].as_str()?.to_string(),
                        logo_path: non_empty_str(p, "logo_path"),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn parse_reviews(data: &Value) -> Vec<Review> {
    data["results"]
        .as_array()
        .map(|rs| {
            rs.iter()
                .filter_map(|r| {
                    Some(Review {
                        author: r["author"].as_str()?.to_string(),
                        rating: r["author_details"]["rating"].as_f64(),
                        content: r["content"].as_str().unwrap_or_default().to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
