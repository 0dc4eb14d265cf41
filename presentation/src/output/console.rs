//! Console output formatter for batch summaries and review states

use colored::Colorize;
use docflow_application::BatchSummary;
use docflow_domain::{ReviewRecord, RevisionReviewState};

/// Formats workflow results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a batch summary
    pub fn format_summary(summary: &BatchSummary) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} ok, {} failed\n",
            "Batch result:".cyan().bold(),
            summary.succeeded.len(),
            summary.failed.len()
        ));

        if !summary.succeeded.is_empty() {
            output.push_str(&format!("\n{}\n", "Succeeded:".green().bold()));
            for document in &summary.succeeded {
                output.push_str(&format!("  {} {}\n", "v".green(), document));
            }
        }

        if !summary.failed.is_empty() {
            output.push_str(&format!("\n{}\n", "Failed:".red().bold()));
            for failure in &summary.failed {
                output.push_str(&format!(
                    "  {} {}: {}\n",
                    "x".red(),
                    failure.document,
                    failure.reason
                ));
            }
        }

        output
    }

    /// Format a batch summary as JSON
    pub fn format_summary_json(summary: &BatchSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format one revision's review state with its records
    pub fn format_state(state: &RevisionReviewState, records: &[ReviewRecord]) -> String {
        let mut output = String::new();
        let step = state.current_review_step();

        output.push_str(&format!(
            "{} {} rev {}\n",
            "Document:".cyan().bold(),
            state.document,
            state.revision
        ));
        output.push_str(&format!("{} {}\n", "Step:".cyan().bold(), step));

        let date = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
        };
        output.push_str(&format!(
            "{} started {}, due {}, ended {}\n",
            "Dates:".cyan().bold(),
            date(state.review_start_date),
            date(state.review_due_date),
            date(state.review_end_date),
        ));

        if !records.is_empty() {
            output.push_str(&format!("\n{}\n", "Records:".cyan().bold()));
            for record in records {
                output.push_str(&format!(
                    "  {:<10} {:<20} {}\n",
                    record.role.to_string(),
                    record.participant.to_string(),
                    record.status(step)
                ));
            }
        }

        output
    }

    /// Format one revision's review state as JSON
    pub fn format_state_json(state: &RevisionReviewState, records: &[ReviewRecord]) -> String {
        serde_json::to_string_pretty(&serde_json::json!({
            "state": state,
            "records": records,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }
}
