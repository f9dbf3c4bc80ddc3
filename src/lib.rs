//! Verksted - AI-assisted auto repair diagnostics
//!
//! The name "Verksted" comes from the Norwegian word for "workshop."
//!
//! # Overview
//!
//! Verksted turns free-text vehicle symptom descriptions into actionable
//! repair guidance:
//! - Retrieve relevant repair knowledge via semantic similarity search
//! - Generate a structured AI diagnosis grounded in that knowledge, with a
//!   deterministic rule-based fallback when no provider is available
//! - Find, score, and categorize educational repair videos for the customer
//! - Push results to shop-management systems (Tekmetric, Mitchell1, Shop-Ware)
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `embedding` - Embedding generation
//! - `completion` - Text completion (LLM) abstraction
//! - `knowledge` - Repair knowledge store with similarity search
//! - `rag` - Retrieval context building for diagnosis grounding
//! - `diagnosis` - Structured diagnosis generation with fallback rules
//! - `video` - Search query synthesis, ranking, and categorization
//! - `media` - Attachment upload abstraction
//! - `integration` - Shop-management system sinks
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use verksted::config::Settings;
//! use verksted::orchestrator::{DiagnosticPipeline, DiagnosticRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = DiagnosticPipeline::new(settings)?;
//!
//!     let request = DiagnosticRequest::new(vec!["grinding noise when braking".to_string()]);
//!     let report = pipeline.run(&request).await?;
//!     println!(
//!         "{} ({}% confidence)",
//!         report.diagnosis.diagnosis, report.diagnosis.confidence
//!     );
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod diagnosis;
pub mod embedding;
pub mod error;
pub mod integration;
pub mod knowledge;
pub mod media;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod video;

pub use error::{Result, VerkstedError};
