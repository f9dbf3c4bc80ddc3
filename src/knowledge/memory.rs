//! In-memory knowledge store implementation.
//!
//! Useful for testing and small corpora.

use super::{cosine_similarity, KnowledgeDocument, KnowledgeMatch, KnowledgeStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory knowledge store.
pub struct MemoryKnowledgeStore {
    documents: RwLock<HashMap<String, KnowledgeDocument>>,
}

impl MemoryKnowledgeStore {
    /// Create a new in-memory knowledge store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryKnowledgeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeStore for MemoryKnowledgeStore {
    async fn insert(&self, doc: &KnowledgeDocument) -> Result<()> {
        let mut docs = self.documents.write().unwrap();
        docs.insert(doc.id.to_string(), doc.clone());
        Ok(())
    }

    async fn similarity_search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        min_similarity: f32,
    ) -> Result<Vec<KnowledgeMatch>> {
        let docs = self.documents.read().unwrap();

        let mut results: Vec<KnowledgeMatch> = docs
            .values()
            .map(|doc| {
                let score = cosine_similarity(query_embedding, &doc.embedding);
                KnowledgeMatch {
                    document: doc.clone(),
                    score,
                }
            })
            .filter(|m| m.score >= min_similarity)
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);

        Ok(results)
    }

    async fn document_count(&self) -> Result<usize> {
        let docs = self.documents.read().unwrap();
        Ok(docs.len())
    }
}
