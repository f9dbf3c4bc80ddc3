//! Configuration settings for Verksted.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub embedding: EmbeddingSettings,
    pub diagnosis: DiagnosisSettings,
    pub knowledge: KnowledgeSettings,
    pub video: VideoSettings,
    pub integration: IntegrationSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.verksted".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding provider (openai).
    pub provider: String,
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Diagnosis generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisSettings {
    /// Enable LLM-backed diagnosis. When disabled (or when no API key is
    /// available), the rule-based fallback is used directly.
    pub enabled: bool,
    /// LLM model for diagnosis generation.
    pub model: String,
    /// Sampling temperature. Kept low since output must be strict JSON.
    pub temperature: f32,
}

impl Default for DiagnosisSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
        }
    }
}

/// Knowledge store and retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeSettings {
    /// Knowledge store provider (sqlite, memory).
    pub provider: String,
    /// Path to SQLite database (for sqlite provider).
    pub sqlite_path: String,
    /// Number of documents to retrieve per query.
    pub top_k: usize,
    /// Minimum cosine similarity for a document to be used as context.
    pub min_similarity: f32,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            provider: "sqlite".to_string(),
            sqlite_path: "~/.verksted/knowledge.db".to_string(),
            top_k: 5,
            min_similarity: 0.7,
        }
    }
}

/// Video search and ranking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    /// YouTube Data API key. Video search is reported as unavailable
    /// without it.
    pub youtube_api_key: Option<String>,
    /// Results requested per synthesized query.
    pub max_results_per_query: u8,
    /// Upper bound on the final ranked list.
    pub max_videos: usize,
    /// Duration filter passed to the search provider (short, medium, long).
    pub duration_filter: String,
    /// Maximum concurrent search calls during fan-out.
    pub max_concurrent_searches: usize,
    /// Channels whose videos receive an authority bonus during ranking.
    pub authority_channels: Vec<String>,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            youtube_api_key: None,
            max_results_per_query: 5,
            max_videos: 8,
            duration_filter: "medium".to_string(),
            max_concurrent_searches: 4,
            authority_channels: default_authority_channels(),
        }
    }
}

/// Curated list of automotive channels with consistently reliable content.
pub fn default_authority_channels() -> Vec<String> {
    [
        "ChrisFix",
        "Scotty Kilmer",
        "Engineering Explained",
        "1A Auto",
        "RepairSmith",
        "South Main Auto Repair",
        "ETCG1",
        "Scanner Danner",
        "Pine Hollow Auto Diagnostics",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Shop-management integration settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IntegrationSettings {
    /// Integration type (tekmetric, mitchell1, shopware, none).
    pub integration_type: String,
    /// API key or bearer token for the external system.
    pub api_key: String,
    /// Shop identifier within the external system.
    pub shop_id: String,
    /// Location identifier (Shop-Ware).
    pub location_id: Option<String>,
    /// Override for the external API base URL.
    pub base_url: Option<String>,
    /// Whether pushes to the external system are enabled.
    pub enabled: bool,
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::VerkstedError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("verksted")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded SQLite knowledge database path.
    pub fn sqlite_path(&self) -> PathBuf {
        Self::expand_path(&self.knowledge.sqlite_path)
    }

    /// YouTube API key from config, falling back to the environment.
    pub fn youtube_api_key(&self) -> Option<String> {
        self.video
            .youtube_api_key
            .clone()
            .or_else(|| std::env::var("YOUTUBE_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }
}
