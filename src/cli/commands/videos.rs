//! Videos command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::DiagnosticPipeline;
use anyhow::Result;
use console::style;

/// Run the videos command.
pub async fn run_videos(diagnosis: &str, symptoms: &[String], settings: Settings) -> Result<()> {
    let pipeline = DiagnosticPipeline::new(settings)?;

    let spinner = Output::spinner("Searching for videos...");
    let result = pipeline
        .find_educational_videos(diagnosis, symptoms, None)
        .await;
    spinner.finish_and_clear();

    let videos = match result {
        Ok(videos) => videos,
        Err(e) if e.is_configuration() => {
            Output::error(
                "Video search is not configured. Set YOUTUBE_API_KEY or add \
                 youtube_api_key to the [video] section of your config.",
            );
            return Err(anyhow::anyhow!("{}", e));
        }
        Err(e) => {
            Output::error(&format!("Video search failed: {}", e));
            return Err(anyhow::anyhow!("{}", e));
        }
    };

    let sections = [
        ("Understanding the symptoms", videos.symptom_explanation),
        ("Repair walkthroughs", videos.repair_walkthrough),
        ("Cost breakdowns", videos.cost_breakdown),
        ("Prevention", videos.prevention),
    ];

    let mut total = 0;
    for (label, section) in sections {
        if section.is_empty() {
            continue;
        }
        total += section.len();
        println!("\n{}", style(label).bold().cyan());
        for video in &section {
            Output::video(video);
        }
    }

    if total == 0 {
        Output::warning("No relevant videos found.");
    } else {
        println!();
        Output::success(&format!("Found {} videos", total));
    }

    Ok(())
}
