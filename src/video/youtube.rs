//! YouTube Data API v3 search provider.
//!
//! Two-phase fetch: `search.list` returns matching video ids, then
//! `videos.list` supplies statistics and runtime for ranking. Ids are
//! batched at the API limit of 50 per request.

use super::{VideoCandidate, VideoSearch};
use crate::error::{Result, VerkstedError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const IDS_PER_DETAILS_REQUEST: usize = 50;

/// YouTube-backed video search.
pub struct YouTubeSearch {
    client: reqwest::Client,
    api_key: String,
    duration_filter: String,
}

impl YouTubeSearch {
    /// Create a new provider with an API key.
    pub fn new(api_key: String, duration_filter: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            duration_filter,
        }
    }

    async fn search_ids(&self, query: &str, max_results: u8) -> Result<Vec<String>> {
        let response: SearchResponse = self
            .client
            .get(format!("{}/search", API_BASE))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", &max_results.to_string()),
                ("videoDuration", &self.duration_filter),
                ("relevanceLanguage", "en"),
                ("safeSearch", "strict"),
                ("key", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| VerkstedError::VideoSearch(format!("Search request failed: {}", e)))?
            .json()
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    async fn fetch_details(&self, video_ids: &[String]) -> Result<Vec<VideoCandidate>> {
        let mut candidates = Vec::with_capacity(video_ids.len());

        for chunk in video_ids.chunks(IDS_PER_DETAILS_REQUEST) {
            let response: DetailsResponse = self
                .client
                .get(format!("{}/videos", API_BASE))
                .query(&[
                    ("part", "snippet,statistics,contentDetails"),
                    ("id", &chunk.join(",")),
                    ("key", &self.api_key),
                ])
                .send()
                .await?
                .error_for_status()
                .map_err(|e| {
                    VerkstedError::VideoSearch(format!("Details request failed: {}", e))
                })?
                .json()
                .await?;

            for item in response.items {
                candidates.push(VideoCandidate {
                    id: item.id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                    thumbnail: item
                        .snippet
                        .thumbnails
                        .medium
                        .or(item.snippet.thumbnails.default)
                        .map(|t| t.url),
                    channel_title: item.snippet.channel_title,
                    published_at: item.snippet.published_at,
                    view_count: item
                        .statistics
                        .and_then(|s| s.view_count)
                        .and_then(|v| v.parse().ok()),
                    duration: item.content_details.map(|d| d.duration),
                });
            }
        }

        Ok(candidates)
    }
}

#[async_trait]
impl VideoSearch for YouTubeSearch {
    #[instrument(skip(self), fields(query = %query))]
    async fn search(&self, query: &str, max_results: u8) -> Result<Vec<VideoCandidate>> {
        let ids = self.search_ids(query, max_results).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.fetch_details(&ids).await?;
        debug!("Found {} candidates for query", candidates.len());
        Ok(candidates)
    }
}

// Wire types for the YouTube Data API.

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    items: Vec<DetailsItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailsItem {
    id: String,
    snippet: Snippet,
    statistics: Option<Statistics>,
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    channel_title: String,
    published_at: DateTime<Utc>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: String,
}
