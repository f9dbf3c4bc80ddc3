//! Retrieval-augmented grounding for diagnosis generation.
//!
//! Pulls the most relevant repair-knowledge documents for a symptom
//! description and formats them into a context block for the LLM prompt.

mod context;

pub use context::ContextBuilder;
