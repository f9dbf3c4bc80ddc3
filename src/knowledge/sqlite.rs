//! SQLite-based knowledge store implementation.
//!
//! Uses SQLite with cosine similarity computed in Rust for simplicity. The
//! seeded corpus is small (tens of documents), so a full scan per query is
//! fine; for larger corpora consider the sqlite-vec extension.

use super::{cosine_similarity, KnowledgeDocument, KnowledgeMatch, KnowledgeStore};
use crate::error::{Result, VerkstedError};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

/// SQLite-based knowledge store.
pub struct SqliteKnowledgeStore {
    conn: Mutex<Connection>,
}

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS repair_knowledge (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        category TEXT NOT NULL,
        content TEXT NOT NULL,
        embedding BLOB NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_repair_knowledge_category ON repair_knowledge(category);
"#;

impl SqliteKnowledgeStore {
    /// Open (or create) a knowledge store at the given path.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized SQLite knowledge store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory knowledge store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Serialize embedding to bytes.
    fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Deserialize embedding from bytes.
    fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| {
                let arr: [u8; 4] = chunk.try_into().unwrap_or_default();
                f32::from_le_bytes(arr)
            })
            .collect()
    }

    fn load_all(&self) -> Result<Vec<KnowledgeDocument>> {
        let conn = self.conn.lock().map_err(|e| {
            VerkstedError::KnowledgeStore(format!("Failed to acquire lock: {}", e))
        })?;

        let mut stmt =
            conn.prepare("SELECT id, title, category, content, embedding FROM repair_knowledge")?;

        let docs = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                let embedding_bytes: Vec<u8> = row.get(4)?;
                Ok(KnowledgeDocument {
                    id: Uuid::parse_str(&id).unwrap_or_else(|_| Uuid::nil()),
                    title: row.get(1)?,
                    category: row.get(2)?,
                    content: row.get(3)?,
                    embedding: Self::bytes_to_embedding(&embedding_bytes),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(docs)
    }
}

#[async_trait]
impl KnowledgeStore for SqliteKnowledgeStore {
    #[instrument(skip(self, doc), fields(title = %doc.title))]
    async fn insert(&self, doc: &KnowledgeDocument) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| {
            VerkstedError::KnowledgeStore(format!("Failed to acquire lock: {}", e))
        })?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO repair_knowledge (id, title, category, content, embedding)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                doc.id.to_string(),
                doc.title,
                doc.category,
                doc.content,
                Self::embedding_to_bytes(&doc.embedding),
            ],
        )?;

        Ok(())
    }

    async fn similarity_search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        min_similarity: f32,
    ) -> Result<Vec<KnowledgeMatch>> {
        let docs = self.load_all()?;

        let mut results: Vec<KnowledgeMatch> = docs
            .into_iter()
            .map(|doc| {
                let score = cosine_similarity(query_embedding, &doc.embedding);
                KnowledgeMatch { document: doc, score }
            })
            .filter(|m| m.score >= min_similarity)
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);

        Ok(results)
    }

    async fn document_count(&self) -> Result<usize> {
        let conn = self.conn.lock().map_err(|e| {
            VerkstedError::KnowledgeStore(format!("Failed to acquire lock: {}", e))
        })?;

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM repair_knowledge", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_store_roundtrip() {
        let store = SqliteKnowledgeStore::in_memory().unwrap();

        let doc = KnowledgeDocument::new(
            "Wheel Bearing Noise".to_string(),
            "wheels".to_string(),
            "Humming noise that changes with speed.".to_string(),
            vec![0.6, 0.8, 0.0],
        );
        store.insert(&doc).await.unwrap();

        assert_eq!(store.document_count().await.unwrap(), 1);

        let results = store
            .similarity_search(&[0.6, 0.8, 0.0], 5, 0.7)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.title, "Wheel Bearing Noise");
        assert_eq!(results[0].document.embedding, vec![0.6, 0.8, 0.0]);
        assert!((results[0].score - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_embedding_bytes_roundtrip() {
        let embedding = vec![0.25_f32, -1.5, 3.0];
        let bytes = SqliteKnowledgeStore::embedding_to_bytes(&embedding);
        assert_eq!(SqliteKnowledgeStore::bytes_to_embedding(&bytes), embedding);
    }
}
