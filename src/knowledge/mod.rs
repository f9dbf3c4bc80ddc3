//! Repair knowledge store abstraction.
//!
//! Holds the seeded automotive repair corpus with precomputed embeddings and
//! answers nearest-neighbor similarity queries. Documents are immutable once
//! seeded; query time is read-only.

mod memory;
pub mod seed;
mod sqlite;

pub use memory::MemoryKnowledgeStore;
pub use sqlite::SqliteKnowledgeStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A repair knowledge document with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// Unique document ID.
    pub id: Uuid,
    /// Document title (e.g. "Brake Pad Wear - Symptoms and Replacement").
    pub title: String,
    /// Knowledge category (e.g. "brakes", "electrical").
    pub category: String,
    /// Full text content.
    pub content: String,
    /// Embedding vector.
    pub embedding: Vec<f32>,
}

impl KnowledgeDocument {
    /// Create a new document with a fresh ID.
    pub fn new(title: String, category: String, content: String, embedding: Vec<f32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            category,
            content,
            embedding,
        }
    }
}

/// A knowledge match with similarity score.
#[derive(Debug, Clone)]
pub struct KnowledgeMatch {
    /// The matched document.
    pub document: KnowledgeDocument,
    /// Cosine similarity score (higher is better).
    pub score: f32,
}

/// Trait for knowledge store implementations.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Insert a document. Used by the seeding process only.
    async fn insert(&self, doc: &KnowledgeDocument) -> Result<()>;

    /// Find documents whose embedding similarity to the query exceeds
    /// `min_similarity`, best first, at most `top_k` results.
    async fn similarity_search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        min_similarity: f32,
    ) -> Result<Vec<KnowledgeMatch>>;

    /// Get total document count.
    async fn document_count(&self) -> Result<usize>;
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_mismatched_lengths() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}
