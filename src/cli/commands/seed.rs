//! Seed command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::embedding::OpenAIEmbedder;
use crate::knowledge::seed::{seed_knowledge, REPAIR_KNOWLEDGE};
use crate::knowledge::{KnowledgeStore, SqliteKnowledgeStore};
use anyhow::Result;
use std::sync::Arc;

/// Run the seed command.
pub async fn run_seed(settings: Settings) -> Result<()> {
    let store = Arc::new(SqliteKnowledgeStore::new(&settings.sqlite_path())?);

    let existing = store.document_count().await?;
    if existing > 0 {
        Output::info(&format!(
            "Knowledge base already contains {} documents; seeding adds the built-in corpus again.",
            existing
        ));
    }

    let embedder = Arc::new(OpenAIEmbedder::with_config(
        &settings.embedding.model,
        settings.embedding.dimensions as usize,
    ));

    let spinner = Output::spinner(&format!(
        "Embedding and inserting {} documents...",
        REPAIR_KNOWLEDGE.len()
    ));
    let inserted = seed_knowledge(store.clone(), embedder).await?;
    spinner.finish_and_clear();

    Output::success(&format!("Seeded {} knowledge documents", inserted));
    Output::kv(
        "Total documents",
        &store.document_count().await?.to_string(),
    );

    Ok(())
}
