//! Text completion abstraction for diagnosis generation.
//!
//! The diagnosis generator only needs "prompt in, free text out"; the
//! provider gives no guarantee the output is valid JSON, so parsing and
//! fallback live with the caller.

mod openai;

pub use openai::OpenAICompleter;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for text completion providers.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Generate a free-text completion for a prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
