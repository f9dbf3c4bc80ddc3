//! Educational video search, ranking, and categorization.
//!
//! Given a diagnosis and the customer's symptom descriptions, this module
//! synthesizes a diversified set of search queries, fans them out to a video
//! search provider, then deduplicates, scores, and buckets the candidates
//! into pedagogical categories.

pub mod query;
pub mod rank;
mod youtube;

pub use query::build_search_queries;
pub use rank::{categorize_video, group_by_category, VideoRanker};
pub use youtube::YouTubeSearch;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw video candidate returned by the search provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCandidate {
    /// Provider video ID.
    pub id: String,
    /// Video title.
    pub title: String,
    /// Video description.
    pub description: String,
    /// Thumbnail URL, when available.
    pub thumbnail: Option<String>,
    /// Channel name.
    pub channel_title: String,
    /// Publish timestamp.
    pub published_at: DateTime<Utc>,
    /// View count, when the provider exposes statistics.
    pub view_count: Option<u64>,
    /// Runtime in the provider's encoding (ISO 8601 for YouTube).
    pub duration: Option<String>,
}

/// Pedagogical video categories. Mutually exclusive per video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoCategory {
    SymptomExplanation,
    RepairWalkthrough,
    CostBreakdown,
    Prevention,
}

impl std::fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VideoCategory::SymptomExplanation => "symptom_explanation",
            VideoCategory::RepairWalkthrough => "repair_walkthrough",
            VideoCategory::CostBreakdown => "cost_breakdown",
            VideoCategory::Prevention => "prevention",
        };
        write!(f, "{}", name)
    }
}

/// A scored, categorized video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedVideo {
    #[serde(flatten)]
    pub video: VideoCandidate,
    /// Multi-factor relevance score. Never negative.
    pub score: f64,
    /// Assigned pedagogical category.
    pub category: VideoCategory,
}

impl RankedVideo {
    /// Watch URL for this video.
    pub fn url(&self) -> String {
        format!("https://youtube.com/watch?v={}", self.video.id)
    }
}

/// Ranked videos grouped into the four fixed category buckets, preserving
/// relative order within each bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorizedVideos {
    pub symptom_explanation: Vec<RankedVideo>,
    pub repair_walkthrough: Vec<RankedVideo>,
    pub cost_breakdown: Vec<RankedVideo>,
    pub prevention: Vec<RankedVideo>,
}

impl CategorizedVideos {
    /// Flatten buckets back to a single list in fixed category order.
    pub fn flatten(self) -> Vec<RankedVideo> {
        let mut all = self.symptom_explanation;
        all.extend(self.repair_walkthrough);
        all.extend(self.cost_breakdown);
        all.extend(self.prevention);
        all
    }
}

/// Trait for keyword search over a video corpus.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Search for candidate videos matching a query.
    async fn search(&self, query: &str, max_results: u8) -> Result<Vec<VideoCandidate>>;
}

/// Format an ISO 8601 duration (e.g. "PT1H2M30S") as "h:mm:ss" or "m:ss".
pub fn format_duration(iso_duration: &str) -> String {
    let re = regex::Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("valid regex");
    let Some(caps) = re.captures(iso_duration) else {
        return String::new();
    };

    let part = |i: usize| -> u32 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let (hours, minutes, seconds) = (part(1), part(2), part(3));

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Format a view count as a compact human-readable string.
pub fn format_view_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M views", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K views", count as f64 / 1_000.0)
    } else {
        format!("{} views", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration("PT12M34S"), "12:34");
        assert_eq!(format_duration("PT1H2M3S"), "1:02:03");
        assert_eq!(format_duration("PT45S"), "0:45");
        assert_eq!(format_duration("PT8M"), "8:00");
        assert_eq!(format_duration("garbage"), "0:00");
    }

    #[test]
    fn test_format_view_count() {
        assert_eq!(format_view_count(523), "523 views");
        assert_eq!(format_view_count(12_400), "12.4K views");
        assert_eq!(format_view_count(3_200_000), "3.2M views");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(VideoCategory::SymptomExplanation.to_string(), "symptom_explanation");
        assert_eq!(VideoCategory::RepairWalkthrough.to_string(), "repair_walkthrough");
    }
}
