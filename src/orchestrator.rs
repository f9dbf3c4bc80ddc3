//! Pipeline orchestrator for Verksted.
//!
//! Coordinates a diagnostic request end to end: validation, attachment
//! upload, knowledge-grounded diagnosis, and educational video search.

use crate::completion::{Completer, OpenAICompleter};
use crate::config::{Prompts, Settings};
use crate::diagnosis::{DiagnosisGenerator, DiagnosisResult, VehicleInfo};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{Result, VerkstedError};
use crate::integration::{DiagnosticPayload, VideoLink};
use crate::knowledge::{KnowledgeStore, SqliteKnowledgeStore};
use crate::media::{upload_all, Attachment, MediaStore};
use crate::rag::ContextBuilder;
use crate::video::{
    build_search_queries, group_by_category, CategorizedVideos, VideoCandidate, VideoRanker,
    VideoSearch, YouTubeSearch,
};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A customer diagnostic request.
#[derive(Debug, Clone)]
pub struct DiagnosticRequest {
    /// Symptom descriptions in the customer's words. At least one required.
    pub symptoms: Vec<String>,
    /// Vehicle metadata, when known.
    pub vehicle: Option<VehicleInfo>,
    /// Photos or audio clips attached to the request.
    pub attachments: Vec<Attachment>,
    /// Whether to search for educational videos. Defaults to true.
    pub include_videos: bool,
}

impl DiagnosticRequest {
    pub fn new(symptoms: Vec<String>) -> Self {
        Self {
            symptoms,
            vehicle: None,
            attachments: Vec::new(),
            include_videos: true,
        }
    }

    pub fn without_videos(mut self) -> Self {
        self.include_videos = false;
        self
    }

    pub fn with_vehicle(mut self, vehicle: VehicleInfo) -> Self {
        self.vehicle = Some(vehicle);
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Validate the request before any provider calls are made.
    pub fn validate(&self) -> Result<()> {
        if self.symptoms.iter().all(|s| s.trim().is_empty()) {
            return Err(VerkstedError::InvalidInput(
                "At least one non-empty symptom description is required".to_string(),
            ));
        }
        if let Some(vehicle) = &self.vehicle {
            vehicle.validate()?;
        }
        Ok(())
    }

    /// All symptoms joined into a single description for diagnosis.
    pub fn symptom_text(&self) -> String {
        self.symptoms
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(". ")
    }
}

/// The full result of a diagnostic run.
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    pub diagnosis: DiagnosisResult,
    /// Ranked videos grouped by category. Empty when the search found
    /// nothing or the video pipeline failed.
    pub videos: CategorizedVideos,
    /// False when no video search provider is configured. Distinguishes
    /// "no videos found" from "search unavailable" for display.
    pub video_search_available: bool,
    /// URLs of successfully uploaded attachments.
    pub attachment_urls: Vec<String>,
}

impl DiagnosticReport {
    /// Convert the report to the payload shape pushed to shop integrations.
    pub fn to_payload(&self) -> DiagnosticPayload {
        let links: Vec<VideoLink> = self
            .videos
            .clone()
            .flatten()
            .into_iter()
            .map(|v| VideoLink {
                title: v.video.title.clone(),
                url: v.url(),
            })
            .collect();

        DiagnosticPayload {
            diagnosis: self.diagnosis.diagnosis.clone(),
            recommended_parts: self.diagnosis.recommended_parts.clone(),
            estimated_cost: self.diagnosis.estimated_cost,
            confidence: self.diagnosis.confidence,
            educational_videos: if links.is_empty() { None } else { Some(links) },
        }
    }
}

/// The main orchestrator for the diagnostic pipeline.
pub struct DiagnosticPipeline {
    settings: Settings,
    generator: DiagnosisGenerator,
    video_search: Option<Arc<dyn VideoSearch>>,
    media_store: Option<Arc<dyn MediaStore>>,
    ranker: VideoRanker,
}

impl DiagnosticPipeline {
    /// Create a pipeline with providers built from settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;

        let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::with_config(
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
        ));

        let knowledge_store: Arc<dyn KnowledgeStore> =
            Arc::new(SqliteKnowledgeStore::new(&settings.sqlite_path())?);

        let context_builder = ContextBuilder::new(knowledge_store, embedder)
            .with_top_k(settings.knowledge.top_k)
            .with_min_similarity(settings.knowledge.min_similarity);

        let completer: Option<Arc<dyn Completer>> = if settings.diagnosis.enabled {
            Some(Arc::new(OpenAICompleter::with_config(
                &settings.diagnosis.model,
                settings.diagnosis.temperature,
            )))
        } else {
            info!("LLM diagnosis disabled, using rule-based fallback");
            None
        };

        let generator =
            DiagnosisGenerator::new(context_builder, completer).with_prompts(prompts);

        let video_search: Option<Arc<dyn VideoSearch>> =
            settings.youtube_api_key().map(|key| {
                Arc::new(YouTubeSearch::new(
                    key,
                    settings.video.duration_filter.clone(),
                )) as Arc<dyn VideoSearch>
            });

        let ranker = VideoRanker::new(
            settings.video.authority_channels.clone(),
            settings.video.max_videos,
        );

        Ok(Self {
            settings,
            generator,
            video_search,
            media_store: None,
            ranker,
        })
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        settings: Settings,
        generator: DiagnosisGenerator,
        video_search: Option<Arc<dyn VideoSearch>>,
        media_store: Option<Arc<dyn MediaStore>>,
    ) -> Self {
        let ranker = VideoRanker::new(
            settings.video.authority_channels.clone(),
            settings.video.max_videos,
        );

        Self {
            settings,
            generator,
            video_search,
            media_store,
            ranker,
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a video search provider is configured.
    pub fn video_search_available(&self) -> bool {
        self.video_search.is_some()
    }

    /// Run a diagnostic request through the full pipeline.
    ///
    /// Diagnosis always succeeds for a valid request. Attachment uploads and
    /// video search degrade independently: a failure there never fails the
    /// run, it just leaves that section of the report empty.
    #[instrument(skip(self, request))]
    pub async fn run(&self, request: &DiagnosticRequest) -> Result<DiagnosticReport> {
        request.validate()?;

        let attachment_urls = match &self.media_store {
            Some(store) if !request.attachments.is_empty() => {
                upload_all(store.as_ref(), &request.attachments).await
            }
            _ => Vec::new(),
        };

        let symptom_text = request.symptom_text();
        let diagnosis = self
            .generator
            .generate(&symptom_text, request.vehicle.as_ref())
            .await;
        info!(
            confidence = diagnosis.confidence,
            "Diagnosis: {}", diagnosis.diagnosis
        );

        let videos = if !request.include_videos {
            CategorizedVideos::default()
        } else {
            match self
                .find_educational_videos(
                &diagnosis.diagnosis,
                    &request.symptoms,
                    request.vehicle.as_ref(),
                )
                .await
            {
                Ok(videos) => videos,
                Err(e) if e.is_configuration() => {
                    info!("Video search not configured, skipping");
                    CategorizedVideos::default()
                }
                Err(e) => {
                    warn!("Video search failed, returning diagnosis without videos: {}", e);
                    CategorizedVideos::default()
                }
            }
        };

        Ok(DiagnosticReport {
            diagnosis,
            videos,
            video_search_available: self.video_search.is_some(),
            attachment_urls,
        })
    }

    /// Search, rank, and categorize educational videos for a diagnosis.
    ///
    /// Individual query failures are tolerated; the whole call fails only
    /// when no provider is configured.
    #[instrument(skip(self, symptoms, vehicle))]
    pub async fn find_educational_videos(
        &self,
        diagnosis: &str,
        symptoms: &[String],
        vehicle: Option<&VehicleInfo>,
    ) -> Result<CategorizedVideos> {
        let search = self.video_search.as_ref().ok_or_else(|| {
            VerkstedError::Config("No video search provider configured".to_string())
        })?;

        let queries = build_search_queries(diagnosis, symptoms, vehicle);
        info!("Fanning out {} video search queries", queries.len());

        let max_results = self.settings.video.max_results_per_query;
        let candidates: Vec<VideoCandidate> = stream::iter(queries)
            .map(|query| {
                let search = Arc::clone(search);
                async move {
                    match search.search(&query, max_results).await {
                        Ok(videos) => videos,
                        Err(e) => {
                            warn!("Query '{}' failed, skipping: {}", query, e);
                            Vec::new()
                        }
                    }
                }
            })
            .buffer_unordered(self.settings.video.max_concurrent_searches)
            .collect::<Vec<Vec<VideoCandidate>>>()
            .await
            .into_iter()
            .flatten()
            .collect();

        let ranked = self.ranker.rank(candidates, diagnosis);
        info!("Ranked {} videos", ranked.len());

        Ok(group_by_category(ranked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::Completer;
    use crate::knowledge::MemoryKnowledgeStore;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubEmbedder;

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    struct FailingCompleter;

    #[async_trait]
    impl Completer for FailingCompleter {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(VerkstedError::Provider("service unavailable".to_string()))
        }
    }

    /// Search stub that returns one brake video per query, failing for
    /// queries containing a marker string.
    struct StubSearch {
        calls: AtomicUsize,
        fail_marker: Option<&'static str>,
    }

    #[async_trait]
    impl VideoSearch for StubSearch {
        async fn search(&self, query: &str, _max_results: u8) -> Result<Vec<VideoCandidate>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(marker) = self.fail_marker {
                if query.contains(marker) {
                    return Err(VerkstedError::VideoSearch("quota exceeded".to_string()));
                }
            }
            Ok(vec![VideoCandidate {
                id: format!("vid{}", n),
                title: format!("Brake pad replacement part {}", n),
                description: "Full walkthrough".to_string(),
                thumbnail: None,
                channel_title: "ChrisFix".to_string(),
                published_at: Utc::now() - Duration::days(100),
                view_count: Some(250_000),
                duration: Some("PT14M2S".to_string()),
            }])
        }
    }

    fn generator() -> DiagnosisGenerator {
        let context_builder = ContextBuilder::new(
            Arc::new(MemoryKnowledgeStore::new()),
            Arc::new(StubEmbedder),
        );
        DiagnosisGenerator::new(context_builder, Some(Arc::new(FailingCompleter)))
    }

    fn pipeline(search: Option<Arc<dyn VideoSearch>>) -> DiagnosticPipeline {
        DiagnosticPipeline::with_components(Settings::default(), generator(), search, None)
    }

    #[tokio::test]
    async fn test_full_run_with_fallback_diagnosis_and_videos() {
        let search = Arc::new(StubSearch {
            calls: AtomicUsize::new(0),
            fail_marker: None,
        });
        let pipeline = pipeline(Some(search));

        let request = DiagnosticRequest::new(vec![
            "grinding noise when braking".to_string(),
        ]);
        let report = pipeline.run(&request).await.unwrap();

        // Failing completer degrades to the brake fallback rule
        assert_eq!(report.diagnosis.confidence, 75);
        assert_eq!(report.diagnosis.estimated_cost, 350.0);
        assert!(report
            .diagnosis
            .recommended_parts
            .contains(&"Brake Pad Set".to_string()));

        assert!(report.video_search_available);
        let videos = report.videos.clone().flatten();
        assert!(!videos.is_empty());
        assert!(videos.len() <= 8);
    }

    #[tokio::test]
    async fn test_one_failed_query_does_not_sink_the_fanout() {
        let search = Arc::new(StubSearch {
            calls: AtomicUsize::new(0),
            fail_marker: Some("how to fix"),
        });
        let pipeline = pipeline(Some(search));

        let videos = pipeline
            .find_educational_videos(
                "worn brake pads",
                &["grinding noise when braking".to_string()],
                None,
            )
            .await
            .unwrap();

        assert!(!videos.flatten().is_empty());
    }

    #[tokio::test]
    async fn test_no_video_provider_reports_unavailable() {
        let pipeline = pipeline(None);

        let request = DiagnosticRequest::new(vec!["engine stalls at idle".to_string()]);
        let report = pipeline.run(&request).await.unwrap();

        assert!(!report.video_search_available);
        assert!(report.videos.flatten().is_empty());

        // The videos-only path surfaces the missing provider explicitly
        let err = pipeline
            .find_educational_videos("dead battery", &[], None)
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_empty_request_rejected() {
        let pipeline = pipeline(None);
        let request = DiagnosticRequest::new(vec!["   ".to_string()]);
        assert!(matches!(
            pipeline.run(&request).await,
            Err(VerkstedError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_report_payload_includes_video_links() {
        let search = Arc::new(StubSearch {
            calls: AtomicUsize::new(0),
            fail_marker: None,
        });
        let pipeline = pipeline(Some(search));

        let request = DiagnosticRequest::new(vec!["squealing brakes".to_string()]);
        let report = pipeline.run(&request).await.unwrap();
        let payload = report.to_payload();

        assert_eq!(payload.confidence, report.diagnosis.confidence);
        let links = payload.educational_videos.expect("videos were found");
        assert!(links.iter().all(|l| l.url.contains("youtube.com/watch?v=")));
    }

    #[test]
    fn test_symptom_text_joins_and_trims() {
        let request = DiagnosticRequest::new(vec![
            " grinding noise ".to_string(),
            "".to_string(),
            "pulls to the left".to_string(),
        ]);
        assert_eq!(
            request.symptom_text(),
            "grinding noise. pulls to the left"
        );
    }
}
