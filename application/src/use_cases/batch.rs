//! Batch outcome aggregation.

use crate::ports::notification_sink::{BatchContext, BatchReport, NotificationSink};
use docflow_domain::{DocumentKey, Participant};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One failed batch item with the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub document: DocumentKey,
    pub reason: String,
}

/// Aggregated outcome of one batch run.
///
/// Items appear in processing order. A target that was skipped by an
/// eligibility filter appears in neither list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub context: BatchContext,
    pub succeeded: Vec<DocumentKey>,
    pub failed: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn new(context: BatchContext) -> Self {
        Self {
            context,
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn push_succeeded(&mut self, document: DocumentKey) {
        self.succeeded.push(document);
    }

    pub fn push_failed(&mut self, document: DocumentKey, reason: impl Into<String>) {
        self.failed.push(BatchFailure {
            document,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// The sink-facing view of this summary.
    pub fn report(&self) -> BatchReport {
        BatchReport {
            context: self.context,
            succeeded: self.succeeded.clone(),
            failed: self.failed.iter().map(|f| f.document.clone()).collect(),
        }
    }
}

/// Deliver the final summary, skipping empty reports. Delivery failures are
/// logged, never raised: a batch never propagates an error to its
/// dispatcher.
pub(crate) async fn send_report(
    sink: &dyn NotificationSink,
    requester: &Participant,
    summary: &BatchSummary,
) {
    if summary.is_empty() {
        return;
    }
    if let Err(e) = sink.notify(requester, &summary.report()).await {
        warn!("Failed to deliver {} batch report: {}", summary.context, e);
    }
}

/// Completion percentage of `processed` items out of `denominator`.
pub(crate) fn percent(processed: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 100.0;
    }
    processed as f64 / denominator as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_accumulates_in_order() {
        let mut summary = BatchSummary::new(BatchContext::StartReview);
        assert!(summary.is_empty());

        summary.push_succeeded("DOC-001".into());
        summary.push_failed("DOC-002".into(), "review already started");
        summary.push_succeeded("DOC-003".into());

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.succeeded.len(), 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].reason, "review already started");

        let report = summary.report();
        assert_eq!(report.succeeded, vec!["DOC-001".into(), "DOC-003".into()]);
        assert_eq!(report.failed, vec![DocumentKey::from("DOC-002")]);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(4, 4), 100.0);
        assert_eq!(percent(0, 0), 100.0);
        // A padded denominator never reaches 100%
        assert!(percent(10, 10 + 30) < 100.0);
    }
}
