//! Candidate deduplication, relevance scoring, and categorization.

use super::{CategorizedVideos, RankedVideo, VideoCandidate, VideoCategory};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Ranks and categorizes video candidates for a diagnosis.
pub struct VideoRanker {
    authority_channels: Vec<String>,
    max_videos: usize,
}

impl VideoRanker {
    /// Create a ranker with the given authority-channel list.
    pub fn new(authority_channels: Vec<String>, max_videos: usize) -> Self {
        Self {
            authority_channels,
            max_videos,
        }
    }

    /// Deduplicate, score, categorize, sort, and truncate candidates.
    ///
    /// Output is a pure function of the candidate set: duplicates collapse by
    /// id and ties break on id, so input order never changes the result.
    pub fn rank(&self, candidates: Vec<VideoCandidate>, diagnosis: &str) -> Vec<RankedVideo> {
        self.rank_at(candidates, diagnosis, Utc::now())
    }

    fn rank_at(
        &self,
        candidates: Vec<VideoCandidate>,
        diagnosis: &str,
        now: DateTime<Utc>,
    ) -> Vec<RankedVideo> {
        // Deduplicate by id, last seen wins
        let mut unique: HashMap<String, VideoCandidate> = HashMap::new();
        for candidate in candidates {
            unique.insert(candidate.id.clone(), candidate);
        }

        debug!("Ranking {} unique candidates", unique.len());

        let mut ranked: Vec<RankedVideo> = unique
            .into_values()
            .map(|video| {
                let score = self.relevance_score(&video, diagnosis, now);
                let category = categorize_video(&video);
                RankedVideo {
                    video,
                    score,
                    category,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.video.id.cmp(&b.video.id))
        });
        ranked.truncate(self.max_videos);

        ranked
    }

    /// Multi-factor relevance score, floored at 0.
    fn relevance_score(
        &self,
        video: &VideoCandidate,
        diagnosis: &str,
        now: DateTime<Utc>,
    ) -> f64 {
        let mut score = 0.0_f64;

        let title = video.title.to_lowercase();
        let description = video.description.to_lowercase();
        let diagnosis_lower = diagnosis.to_lowercase();

        // Title relevance (0-30 points)
        if title.contains(&diagnosis_lower) {
            score += 30.0;
        } else {
            let matched_words = diagnosis_lower
                .split_whitespace()
                .filter(|word| word.len() > 3 && title.contains(word))
                .count();
            score += matched_words as f64 * 5.0;
        }

        // Description relevance (0-10 points)
        if description.contains(&diagnosis_lower) {
            score += 10.0;
        }

        // View count (0-25 points, logarithmic scale)
        if let Some(views) = video.view_count {
            if views > 0 {
                score += ((views as f64).log10() * 3.0).min(25.0);
            }
        }

        // Channel authority (0-20 points)
        let channel_lower = video.channel_title.to_lowercase();
        if self
            .authority_channels
            .iter()
            .any(|channel| channel_lower.contains(&channel.to_lowercase()))
        {
            score += 20.0;
        }

        // Recency bonus, with a penalty for very old videos
        let age_in_years = (now - video.published_at).num_days() as f64 / 365.0;
        if age_in_years < 1.0 {
            score += 15.0;
        } else if age_in_years < 2.0 {
            score += 10.0;
        } else if age_in_years < 3.0 {
            score += 5.0;
        }
        if age_in_years > 5.0 {
            score -= 10.0;
        }

        score.max(0.0)
    }
}

/// Classify a video into one of the four pedagogical categories from its
/// text content. First matching category wins.
pub fn categorize_video(video: &VideoCandidate) -> VideoCategory {
    let combined = format!(
        "{} {}",
        video.title.to_lowercase(),
        video.description.to_lowercase()
    );

    const SYMPTOM_MARKERS: &[&str] = &["symptom", "sound", "noise", "how to know", "diagnosis"];
    const COST_MARKERS: &[&str] = &["cost", "price", "how much", "expensive"];
    const PREVENTION_MARKERS: &[&str] = &["prevent", "maintain", "avoid", "last longer"];

    if SYMPTOM_MARKERS.iter().any(|m| combined.contains(m)) {
        VideoCategory::SymptomExplanation
    } else if COST_MARKERS.iter().any(|m| combined.contains(m)) {
        VideoCategory::CostBreakdown
    } else if PREVENTION_MARKERS.iter().any(|m| combined.contains(m)) {
        VideoCategory::Prevention
    } else {
        VideoCategory::RepairWalkthrough
    }
}

/// Group ranked videos into the four fixed buckets, preserving relative
/// order within each bucket.
pub fn group_by_category(videos: Vec<RankedVideo>) -> CategorizedVideos {
    let mut grouped = CategorizedVideos::default();

    for video in videos {
        match video.category {
            VideoCategory::SymptomExplanation => grouped.symptom_explanation.push(video),
            VideoCategory::RepairWalkthrough => grouped.repair_walkthrough.push(video),
            VideoCategory::CostBreakdown => grouped.cost_breakdown.push(video),
            VideoCategory::Prevention => grouped.prevention.push(video),
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_authority_channels;
    use chrono::Duration;

    fn candidate(id: &str, title: &str, description: &str) -> VideoCandidate {
        VideoCandidate {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            thumbnail: None,
            channel_title: "Some Garage".to_string(),
            published_at: Utc::now() - Duration::days(30),
            view_count: None,
            duration: None,
        }
    }

    fn ranker() -> VideoRanker {
        VideoRanker::new(default_authority_channels(), 8)
    }

    #[test]
    fn test_title_verbatim_match_scores_30() {
        let video = candidate("a", "Brake wear explained", "");
        let mut old = video.clone();
        old.published_at = Utc::now() - Duration::days(4 * 365); // neutral recency

        let score = ranker().relevance_score(&old, "brake wear", Utc::now());
        assert_eq!(score, 30.0);
    }

    #[test]
    fn test_title_word_matches_score_5_each() {
        let mut video = candidate("a", "fixing worn brake rotors today", "");
        video.published_at = Utc::now() - Duration::days(4 * 365);

        // "worn" and "rotors" are >3 chars and present; "front" is not present
        let score = ranker().relevance_score(&video, "worn front rotors", Utc::now());
        assert_eq!(score, 10.0);
    }

    #[test]
    fn test_short_words_do_not_count() {
        let mut video = candidate("a", "the cat sat", "");
        video.published_at = Utc::now() - Duration::days(4 * 365);

        let score = ranker().relevance_score(&video, "cat sat", Utc::now());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_description_match_scores_10() {
        let mut video = candidate("a", "unrelated", "all about brake wear and more");
        video.published_at = Utc::now() - Duration::days(4 * 365);

        let score = ranker().relevance_score(&video, "brake wear", Utc::now());
        assert_eq!(score, 10.0);
    }

    #[test]
    fn test_view_count_is_logarithmic_and_capped() {
        let mut video = candidate("a", "unrelated", "");
        video.published_at = Utc::now() - Duration::days(4 * 365);

        video.view_count = Some(1_000);
        let score = ranker().relevance_score(&video, "xyz", Utc::now());
        assert!((score - 9.0).abs() < 0.001); // log10(1000) * 3

        video.view_count = Some(10_u64.pow(12));
        let score = ranker().relevance_score(&video, "xyz", Utc::now());
        assert_eq!(score, 25.0); // capped

        video.view_count = Some(0);
        let score = ranker().relevance_score(&video, "xyz", Utc::now());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_authority_channel_scores_20() {
        let mut video = candidate("a", "unrelated", "");
        video.published_at = Utc::now() - Duration::days(4 * 365);
        video.channel_title = "chrisfix".to_string();

        let score = ranker().relevance_score(&video, "xyz", Utc::now());
        assert_eq!(score, 20.0);
    }

    #[test]
    fn test_recency_tiers() {
        let now = Utc::now();
        let mut video = candidate("a", "unrelated", "");
        let tiers = [
            (100, 15.0),        // < 1 year
            (500, 10.0),        // 1-2 years
            (900, 5.0),         // 2-3 years
            (4 * 365, 0.0),     // 3-5 years, neutral
            (7 * 365, 0.0),     // > 5 years: -10, floored at 0
        ];
        for (days, expected) in tiers {
            video.published_at = now - Duration::days(days);
            assert_eq!(ranker().relevance_score(&video, "xyz", now), expected);
        }
    }

    #[test]
    fn test_score_never_negative() {
        let mut video = candidate("a", "nothing relevant", "");
        video.published_at = Utc::now() - Duration::days(10 * 365);
        assert_eq!(ranker().relevance_score(&video, "brake wear", Utc::now()), 0.0);
    }

    #[test]
    fn test_categorize_order_and_default() {
        let symptom = candidate("a", "Grinding noise when braking?", "");
        assert_eq!(categorize_video(&symptom), VideoCategory::SymptomExplanation);

        // "noise" would also match symptoms, but cost markers are only
        // checked after symptom markers miss
        let cost = candidate("b", "How much does a brake job really run", "price breakdown");
        assert_eq!(categorize_video(&cost), VideoCategory::CostBreakdown);

        let prevention = candidate("c", "Make your pads last longer", "");
        assert_eq!(categorize_video(&prevention), VideoCategory::Prevention);

        let walkthrough = candidate("d", "Replacing front pads step by step", "");
        assert_eq!(categorize_video(&walkthrough), VideoCategory::RepairWalkthrough);
    }

    #[test]
    fn test_rank_deduplicates_by_id() {
        let candidates = vec![
            candidate("dup", "first copy", ""),
            candidate("dup", "second copy", ""),
            candidate("other", "another video", ""),
        ];

        let ranked = ranker().rank(candidates, "brake wear");
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked.iter().filter(|v| v.video.id == "dup").count(), 1);
    }

    #[test]
    fn test_rank_bounded_and_sorted() {
        let candidates: Vec<VideoCandidate> = (0..20)
            .map(|i| candidate(&format!("v{:02}", i), &format!("video {}", i), ""))
            .collect();

        let ranked = ranker().rank(candidates, "brake wear");
        assert!(ranked.len() <= 8);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_rank_invariant_under_permutation() {
        let candidates = vec![
            candidate("a", "brake wear explained", "symptom overview"),
            candidate("b", "how much does it cost", "price guide"),
            candidate("c", "step by step replacement", ""),
            candidate("d", "make brakes last longer", "maintain them"),
        ];

        let mut reversed = candidates.clone();
        reversed.reverse();

        let ids = |ranked: &[RankedVideo]| -> Vec<String> {
            ranked.iter().map(|v| v.video.id.clone()).collect()
        };

        let forward = ranker().rank(candidates, "brake wear");
        let backward = ranker().rank(reversed, "brake wear");
        assert_eq!(ids(&forward), ids(&backward));
    }

    #[test]
    fn test_group_round_trip() {
        let candidates = vec![
            candidate("a", "brake noise symptoms", ""),
            candidate("b", "repair cost breakdown", ""),
            candidate("c", "full replacement walkthrough", ""),
            candidate("d", "prevent premature wear", ""),
        ];

        let ranked = ranker().rank(candidates, "brake wear");
        let mut before: Vec<String> = ranked.iter().map(|v| v.video.id.clone()).collect();

        let grouped = group_by_category(ranked);
        let mut after: Vec<String> = grouped.flatten().iter().map(|v| v.video.id.clone()).collect();

        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_every_video_gets_exactly_one_category() {
        let candidates: Vec<VideoCandidate> = (0..6)
            .map(|i| candidate(&format!("v{}", i), &format!("title {}", i), ""))
            .collect();

        let ranked = ranker().rank(candidates, "anything");
        let total = ranked.len();
        let grouped = group_by_category(ranked);
        assert_eq!(grouped.flatten().len(), total);
    }
}
