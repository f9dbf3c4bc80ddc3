//! Diagnose command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::diagnosis::VehicleInfo;
use crate::integration::{IntegrationManager, SyncOutcome};
use crate::orchestrator::{DiagnosticPipeline, DiagnosticRequest};
use anyhow::Result;
use console::style;

/// Run the diagnose command.
pub async fn run_diagnose(
    symptoms: &[String],
    year: Option<i32>,
    make: Option<String>,
    model: Option<String>,
    no_videos: bool,
    order: Option<String>,
    settings: Settings,
) -> Result<()> {
    let vehicle = match (year, make, model) {
        (Some(year), Some(make), Some(model)) => Some(VehicleInfo { year, make, model }),
        (None, None, None) => None,
        _ => {
            return Err(anyhow::anyhow!(
                "Vehicle info requires all of --year, --make, and --model"
            ));
        }
    };

    let pipeline = DiagnosticPipeline::new(settings.clone())?;

    if !no_videos && !pipeline.video_search_available() {
        Output::warning(
            "No YouTube API key configured; educational videos will be unavailable. \
             Set YOUTUBE_API_KEY or add it to your config.",
        );
    }

    let mut request = DiagnosticRequest::new(symptoms.to_vec());
    if let Some(vehicle) = vehicle {
        request = request.with_vehicle(vehicle);
    }
    if no_videos {
        request = request.without_videos();
    }

    let spinner = Output::spinner("Diagnosing...");
    let report = pipeline.run(&request).await?;
    spinner.finish_and_clear();

    Output::diagnosis(&report.diagnosis);

    if !no_videos {
        let videos = report.videos.clone();
        let sections = [
            ("Understanding the symptoms", videos.symptom_explanation),
            ("Repair walkthroughs", videos.repair_walkthrough),
            ("Cost breakdowns", videos.cost_breakdown),
            ("Prevention", videos.prevention),
        ];

        let mut any = false;
        for (label, section) in sections {
            if section.is_empty() {
                continue;
            }
            any = true;
            println!("\n{}", style(label).bold().cyan());
            for video in &section {
                Output::video(video);
            }
        }

        if !any && report.video_search_available {
            Output::info("No relevant educational videos found.");
        }
    }

    if let Some(order_id) = order {
        let manager = IntegrationManager::from_settings(&settings.integration);
        if !manager.is_configured() {
            Output::warning("No shop integration configured; skipping push.");
            return Ok(());
        }

        println!();
        let spinner = Output::spinner("Pushing to shop system...");
        let outcome = manager
            .sync_diagnostic(&order_id, &report.to_payload())
            .await;
        spinner.finish_and_clear();

        match outcome {
            SyncOutcome::Synced => {
                Output::success(&format!("Diagnostic pushed to order {}", order_id));
            }
            SyncOutcome::Skipped => {
                Output::info("Push skipped.");
            }
            SyncOutcome::Failed(e) => {
                Output::error(&format!("Push failed: {}", e));
            }
        }
    }

    Ok(())
}
