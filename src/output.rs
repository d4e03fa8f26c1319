//! CLI output formatting for batch progress and the final summary.
//!
//! Information-first: each progress line leads with the positional count,
//! then the source file, then what happened to it. Formatting is separated
//! from printing so tests can assert on lines without capturing stdout.

use crate::types::{BatchSummary, ItemOutcome, ProgressUpdate};
use std::path::Path;

/// Format a single progress update as one display line.
pub fn format_progress(update: &ProgressUpdate) -> String {
    let position = format!("[{}/{}]", update.completed, update.total);
    match &update.outcome {
        ItemOutcome::Success { source, output } => {
            format!("{position} {} \u{2192} {}", file_name(source), output.display())
        }
        ItemOutcome::Failure { source, message } => {
            format!("{position} {} error: {message}", file_name(source))
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format the terminal summary: one count line, then every failure with
/// its full path and reason.
pub fn format_summary(summary: &BatchSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Done: {} succeeded, {} failed",
        summary.success_count, summary.error_count
    )];
    if !summary.failures.is_empty() {
        lines.push("Failures".to_string());
        for failure in &summary.failures {
            lines.push(format!("    {}: {}", failure.path.display(), failure.message));
        }
    }
    lines
}

/// Print the summary to stdout.
pub fn print_summary(summary: &BatchSummary) {
    for line in format_summary(summary) {
        println!("{line}");
    }
}
