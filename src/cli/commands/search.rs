//! Search command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::knowledge::{KnowledgeStore, SqliteKnowledgeStore};
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    query: &str,
    limit: usize,
    min_score: f32,
    settings: Settings,
) -> Result<()> {
    let store = SqliteKnowledgeStore::new(&settings.sqlite_path())?;

    if store.document_count().await? == 0 {
        Output::warning("The knowledge base is empty. Run 'verksted seed' first.");
        return Ok(());
    }

    let embedder = OpenAIEmbedder::with_config(
        &settings.embedding.model,
        settings.embedding.dimensions as usize,
    );

    let spinner = Output::spinner("Searching...");
    let query_embedding = embedder.embed(query).await?;
    let matches = store
        .similarity_search(&query_embedding, limit, min_score)
        .await?;
    spinner.finish_and_clear();

    if matches.is_empty() {
        Output::warning("No results found matching your query.");
        return Ok(());
    }

    Output::success(&format!("Found {} results", matches.len()));
    for m in &matches {
        Output::knowledge_result(
            &m.document.title,
            &m.document.category,
            m.score,
            &m.document.content,
        );
    }

    Ok(())
}
