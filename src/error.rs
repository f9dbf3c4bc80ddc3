//! Error types for Verksted.

use thiserror::Error;

/// Library-level error type for Verksted operations.
#[derive(Error, Debug)]
pub enum VerkstedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Knowledge store error: {0}")]
    KnowledgeStore(String),

    #[error("Video search error: {0}")]
    VideoSearch(String),

    #[error("Integration error: {0}")]
    Integration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl VerkstedError {
    /// Whether this error represents a missing or unconfigured capability,
    /// as opposed to a transient provider failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, VerkstedError::Config(_))
    }
}

/// Result type alias for Verksted operations.
pub type Result<T> = std::result::Result<T, VerkstedError>;
