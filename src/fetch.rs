use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::api_types::*;
use crate::config::Region;
use crate::models::RawItem;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const MAX_RESULTS_CAP: u32 = 50;

/// Source of candidate videos for a topical query.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_candidates(&self, query: &str, region: Region, limit: u32) -> Result<Vec<RawItem>>;
}

/// Search + statistics lookup against the YouTube Data API v3.
pub struct YouTubeFetcher {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeFetcher {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_API_BASE)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("niche-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Building HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, name: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut all: Vec<(&str, &str)> = params.to_vec();
        all.push(("key", self.api_key.as_str()));
        Url::parse_with_params(&format!("{}/{}", self.base_url, name), &all)
            .with_context(|| format!("Invalid API base URL {}", self.base_url))
    }

    async fn get_json<T: DeserializeOwned>(&self, what: &str, url: Url) -> Result<T> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.without_url()) // keep the key out of error text
            .with_context(|| format!("Request failed for {}", what))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_default();
            warn!("API error - call={}, status={}", what, status);
            if detail.is_empty() {
                return Err(anyhow!("{} returned HTTP {}", what, status));
            }
            return Err(anyhow!("{} returned HTTP {}: {}", what, status, detail));
        }

        resp.json::<T>()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("Decoding JSON for {}", what))
    }

    async fn search_ids(&self, query: &str, region: Region, limit: u32) -> Result<Vec<String>> {
        let max_results = limit.to_string();
        let url = self.endpoint(
            "search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("regionCode", region.code()),
                ("maxResults", max_results.as_str()),
                ("order", "viewCount"),
            ],
        )?;
        let res: ApiSearchResponse = self.get_json("search", url).await?;
        Ok(res.items.into_iter().filter_map(|i| i.id.video_id).collect())
    }

    async fn lookup(&self, ids: &[String]) -> Result<Vec<ApiVideo>> {
        let joined = ids.join(",");
        let url = self.endpoint("videos", &[("part", "snippet,statistics"), ("id", joined.as_str())])?;
        let res: ApiVideoListResponse = self.get_json("videos", url).await?;
        Ok(res.items)
    }
}

#[async_trait]
impl Fetcher for YouTubeFetcher {
    async fn fetch_candidates(&self, query: &str, region: Region, limit: u32) -> Result<Vec<RawItem>> {
        let start = std::time::Instant::now();
        let limit = limit.clamp(1, MAX_RESULTS_CAP);
        debug!("Searching - query={:?}, region={}, limit={}", query, region.code(), limit);

        let ids = self.search_ids(query, region, limit).await?;
        if ids.is_empty() {
            warn!("Search returned no videos - query={:?}, region={}", query, region.code());
            return Ok(Vec::new());
        }
        debug!("Search hits - ids={}", ids.len());

        let videos = self.lookup(&ids).await?;
        let items: Vec<RawItem> = videos.into_iter().map(to_raw_item).collect();

        info!(
            "Video API fetch completed - duration={:.2}s, searched={}, items={}",
            start.elapsed().as_secs_f32(),
            ids.len(),
            items.len()
        );
        Ok(items)
    }
}

fn parse_count(s: &Option<String>) -> Option<u64> {
    s.as_deref().and_then(|v| v.trim().parse().ok())
}

pub fn to_raw_item(v: ApiVideo) -> RawItem {
    let thumbnails = v.snippet.thumbnails;
    let thumbnail_url = thumbnails
        .high
        .or(thumbnails.medium)
        .or(thumbnails.default)
        .map(|t| t.url)
        .unwrap_or_default();

    RawItem {
        views: parse_count(&v.statistics.view_count),
        likes: parse_count(&v.statistics.like_count),
        comments: parse_count(&v.statistics.comment_count),
        id: v.id,
        title: v.snippet.title,
        tags: v.snippet.tags,
        published_at: v.snippet.published_at,
        thumbnail_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_video_maps_to_raw_item() {
        let v: ApiVideo = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "snippet": {
                "title": "Title",
                "publishedAt": "2024-05-01T10:00:00Z",
                "thumbnails": { "medium": { "url": "https://i.ytimg.com/m.jpg" } }
            },
            "statistics": { "viewCount": "1200", "likeCount": "n/a" }
        }))
        .unwrap();

        let item = to_raw_item(v);
        assert_eq!(item.id, "abc");
        assert_eq!(item.views, Some(1200));
        assert_eq!(item.likes, None);
        assert_eq!(item.comments, None);
        assert!(item.tags.is_empty());
        assert_eq!(item.thumbnail_url, "https://i.ytimg.com/m.jpg");
        assert_eq!(item.published_at, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn endpoint_encodes_query_and_key() {
        let f = YouTubeFetcher::with_base_url("k3y", "http://localhost:9/v3/").unwrap();
        let url = f.endpoint("search", &[("q", "lo-fi beats & chill")]).unwrap();
        assert_eq!(url.path(), "/v3/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".into(), "lo-fi beats & chill".into())));
        assert!(pairs.contains(&("key".into(), "k3y".into())));
    }
}
