//! Progress reporting for batch execution

use colored::Colorize;
use docflow_application::{BatchContext, BatchProgressNotifier};
use docflow_domain::DocumentKey;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports batch progress with a percentage bar.
///
/// The bar tracks the percentage stream from the batch, not the item count:
/// the start batch pads its denominator, so its bar deliberately stalls
/// short of 100% until the batch finishes summarizing, at which point the
/// bar is abandoned at its last position.
pub struct BatchProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl BatchProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn context_display_name(context: &BatchContext) -> &'static str {
        match context {
            BatchContext::StartReview => "Starting reviews",
            BatchContext::CloseReviewerStep => "Closing reviews",
        }
    }
}

impl Default for BatchProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProgressNotifier for BatchProgressReporter {
    fn on_batch_start(&self, context: &BatchContext, total: usize) {
        let pb = ProgressBar::new(100);
        pb.set_style(Self::bar_style());
        pb.set_prefix(Self::context_display_name(context).to_string());
        pb.set_message(format!("{} items", total));

        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_item_complete(&self, document: &DocumentKey, success: bool) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), document)
            } else {
                format!("{} {}", "x".red(), document)
            };
            pb.set_message(status);
        }
    }

    fn on_progress(&self, percent: f64) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.set_position(percent.round() as u64);
        }
    }

    fn on_batch_complete(&self, _context: &BatchContext) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.abandon_with_message("done".green().to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl BatchProgressNotifier for SimpleProgress {
    fn on_batch_start(&self, context: &BatchContext, total: usize) {
        println!(
            "{} {} ({} items)",
            "->".cyan(),
            BatchProgressReporter::context_display_name(context).bold(),
            total
        );
    }

    fn on_item_complete(&self, document: &DocumentKey, success: bool) {
        if success {
            println!("  {} {}", "v".green(), document);
        } else {
            println!("  {} {} (failed)", "x".red(), document);
        }
    }

    fn on_progress(&self, _percent: f64) {}

    fn on_batch_complete(&self, _context: &BatchContext) {
        println!();
    }
}
