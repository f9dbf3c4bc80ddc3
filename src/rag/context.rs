//! Context building for diagnosis grounding.

use crate::embedding::Embedder;
use crate::knowledge::{KnowledgeMatch, KnowledgeStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Separator between knowledge documents in the rendered context block.
const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Builds grounding context from the knowledge store.
///
/// Failure policy: any provider error (embedding failure, store unavailable)
/// degrades to an empty string rather than propagating. Diagnosis generation
/// must work with zero context.
pub struct ContextBuilder {
    knowledge_store: Arc<dyn KnowledgeStore>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
    min_similarity: f32,
}

impl ContextBuilder {
    /// Create a new context builder with default retrieval parameters.
    pub fn new(knowledge_store: Arc<dyn KnowledgeStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            knowledge_store,
            embedder,
            top_k: 5,
            min_similarity: 0.7,
        }
    }

    /// Set the maximum number of documents to retrieve.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the minimum similarity threshold.
    pub fn with_min_similarity(mut self, min_similarity: f32) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    /// Build a context block for a symptom description.
    ///
    /// Returns an empty string when nothing relevant is found or when any
    /// provider call fails.
    pub async fn build(&self, symptom_text: &str) -> String {
        let query_embedding = match self.embedder.embed(symptom_text).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!("Embedding failed, continuing without context: {}", e);
                return String::new();
            }
        };

        let matches = match self
            .knowledge_store
            .similarity_search(&query_embedding, self.top_k, self.min_similarity)
            .await
        {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Knowledge search failed, continuing without context: {}", e);
                return String::new();
            }
        };

        if matches.is_empty() {
            debug!("No knowledge documents above similarity threshold");
            return String::new();
        }

        debug!("Retrieved {} knowledge documents", matches.len());
        format_context(&matches)
    }
}

/// Format knowledge matches into a delimited context block.
fn format_context(matches: &[KnowledgeMatch]) -> String {
    matches
        .iter()
        .map(|m| {
            format!(
                "### {} [{}]\n{}",
                m.document.title, m.document.category, m.document.content
            )
        })
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, VerkstedError};
    use crate::knowledge::{KnowledgeDocument, MemoryKnowledgeStore};
    use async_trait::async_trait;

    /// Embedder that returns a fixed vector.
    struct FixedEmbedder(Vec<f32>);

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| self.0.clone()).collect())
        }

        fn dimensions(&self) -> usize {
            self.0.len()
        }
    }

    /// Embedder that always fails.
    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(VerkstedError::Provider("embedding unavailable".to_string()))
        }

        async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(VerkstedError::Provider("embedding unavailable".to_string()))
        }

        fn dimensions(&self) -> usize {
            0
        }
    }

    async fn store_with_brake_doc() -> Arc<MemoryKnowledgeStore> {
        let store = Arc::new(MemoryKnowledgeStore::new());
        store
            .insert(&KnowledgeDocument::new(
                "Brake Pad Wear".to_string(),
                "brakes".to_string(),
                "Grinding noise when braking indicates worn pads.".to_string(),
                vec![1.0, 0.0, 0.0],
            ))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_build_formats_matches() {
        let store = store_with_brake_doc().await;
        let builder = ContextBuilder::new(store, Arc::new(FixedEmbedder(vec![1.0, 0.0, 0.0])));

        let context = builder.build("grinding noise when braking").await;
        assert!(context.contains("### Brake Pad Wear [brakes]"));
        assert!(context.contains("worn pads"));
    }

    #[tokio::test]
    async fn test_embedding_failure_degrades_to_empty() {
        let store = store_with_brake_doc().await;
        let builder = ContextBuilder::new(store, Arc::new(FailingEmbedder));

        assert_eq!(builder.build("grinding noise").await, "");
    }

    #[tokio::test]
    async fn test_below_threshold_yields_empty() {
        let store = store_with_brake_doc().await;
        // Orthogonal query embedding: similarity 0.0, below the 0.7 floor
        let builder = ContextBuilder::new(store, Arc::new(FixedEmbedder(vec![0.0, 1.0, 0.0])));

        assert_eq!(builder.build("completely unrelated").await, "");
    }

    #[tokio::test]
    async fn test_separator_between_documents() {
        let store = Arc::new(MemoryKnowledgeStore::new());
        for title in ["Doc A", "Doc B"] {
            store
                .insert(&KnowledgeDocument::new(
                    title.to_string(),
                    "general".to_string(),
                    "content".to_string(),
                    vec![1.0, 0.0],
                ))
                .await
                .unwrap();
        }
        let builder = ContextBuilder::new(store, Arc::new(FixedEmbedder(vec![1.0, 0.0])));

        let context = builder.build("anything").await;
        assert_eq!(context.matches("---").count(), 1);
        assert!(context.contains("Doc A"));
        assert!(context.contains("Doc B"));
    }
}
