//! CLI output formatting utilities.

use crate::diagnosis::DiagnosisResult;
use crate::video::{format_duration, format_view_count, RankedVideo};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print a structured diagnosis.
    pub fn diagnosis(result: &DiagnosisResult) {
        Output::header("Diagnosis");
        println!("\n{}", result.diagnosis);

        if !result.recommended_parts.is_empty() {
            println!("\n{}", style("Recommended parts").bold());
            for part in &result.recommended_parts {
                Output::list_item(part);
            }
        }

        println!();
        Output::kv("Estimated cost", &format!("${:.2}", result.estimated_cost));
        Output::kv("Confidence", &format!("{}%", result.confidence));
    }

    /// Print a ranked video entry.
    pub fn video(video: &RankedVideo) {
        let mut meta = vec![video.video.channel_title.clone()];
        if let Some(views) = video.video.view_count {
            meta.push(format_view_count(views));
        }
        if let Some(duration) = &video.video.duration {
            meta.push(format_duration(duration));
        }

        println!(
            "\n{} {} (score: {:.0})",
            style(">>").green(),
            style(&video.video.title).bold(),
            video.score
        );
        println!("   {}", style(meta.join(" | ")).dim());
        println!("   {}", style(video.url()).dim());
    }

    /// Print a knowledge search result.
    pub fn knowledge_result(title: &str, category: &str, similarity: f32, content: &str) {
        println!(
            "\n{} {} [{}] (similarity: {:.2})",
            style(">>").green(),
            style(title).bold(),
            style(category).cyan(),
            similarity
        );
        println!("   {}", content_preview(content, 200));
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_len: usize) -> String {
    let content = content.replace('\n', " ");
    if content.len() <= max_len {
        content
    } else {
        format!("{}...", &content[..max_len])
    }
}
