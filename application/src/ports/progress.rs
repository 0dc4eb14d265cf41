//! Batch progress notification port
//!
//! Defines the interface for reporting progress while a batch runs.

use crate::ports::notification_sink::BatchContext;
use docflow_domain::DocumentKey;

/// Callback for progress updates during batch execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.). Within one batch the
/// `on_progress` values are monotonically non-decreasing; the start batch
/// pads its denominator, so its stream deliberately stops short of 100%.
pub trait BatchProgressNotifier: Send + Sync {
    /// Called once before the first item is processed.
    fn on_batch_start(&self, context: &BatchContext, total: usize);

    /// Called after each item, with its outcome.
    fn on_item_complete(&self, document: &DocumentKey, success: bool);

    /// Called after each item with the overall completion percentage.
    fn on_progress(&self, percent: f64);

    /// Called once after the last item, before the final notification.
    fn on_batch_complete(&self, context: &BatchContext);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl BatchProgressNotifier for NoProgress {
    fn on_batch_start(&self, _context: &BatchContext, _total: usize) {}
    fn on_item_complete(&self, _document: &DocumentKey, _success: bool) {}
    fn on_progress(&self, _percent: f64) {}
    fn on_batch_complete(&self, _context: &BatchContext) {}
}
