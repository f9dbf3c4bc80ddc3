//! CLI module for Verksted.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Verksted - AI-assisted auto repair diagnostics
///
/// A CLI tool that turns vehicle symptom descriptions into a structured
/// diagnosis, backed by a searchable repair knowledge base and curated
/// educational videos. The name "Verksted" comes from the Norwegian word
/// for "workshop."
#[derive(Parser, Debug)]
#[command(name = "verksted")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Verksted and verify configuration
    Init,

    /// Diagnose vehicle symptoms
    Diagnose {
        /// Symptom descriptions (repeatable)
        #[arg(required = true)]
        symptoms: Vec<String>,

        /// Vehicle model year
        #[arg(long)]
        year: Option<i32>,

        /// Vehicle make
        #[arg(long)]
        make: Option<String>,

        /// Vehicle model
        #[arg(long)]
        model: Option<String>,

        /// Skip educational video search
        #[arg(long)]
        no_videos: bool,

        /// Push the result to the configured shop integration, attached to
        /// this repair order ID
        #[arg(long)]
        order: Option<String>,
    },

    /// Find educational videos for a known diagnosis
    Videos {
        /// The diagnosis text to find videos for
        diagnosis: String,

        /// Symptom descriptions to widen the search (repeatable)
        #[arg(short, long)]
        symptom: Vec<String>,
    },

    /// Search the repair knowledge base
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Minimum similarity score (0.0-1.0)
        #[arg(short, long, default_value = "0.7")]
        min_score: f32,
    },

    /// Seed the knowledge base with the built-in repair knowledge
    Seed,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
