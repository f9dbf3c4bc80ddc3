//! Configuration management for Verksted.

mod prompts;
mod settings;

pub use prompts::{DiagnosisPrompts, Prompts};
pub use settings::{
    default_authority_channels, DiagnosisSettings, EmbeddingSettings, GeneralSettings,
    IntegrationSettings, KnowledgeSettings, PromptSettings, Settings, VideoSettings,
};
