//! Tracing-backed notification sink.

use async_trait::async_trait;
use docflow_application::{BatchReport, NotificationSink, NotifyError};
use docflow_domain::Participant;
use tracing::info;

/// Sink that logs batch reports through `tracing`.
///
/// The headless default when no notification file is configured.
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn notify(
        &self,
        requester: &Participant,
        report: &BatchReport,
    ) -> Result<(), NotifyError> {
        if !report.succeeded.is_empty() {
            info!(
                "[{}] for {}: succeeded for {}",
                report.context,
                requester,
                join(&report.succeeded)
            );
        }
        if !report.failed.is_empty() {
            info!(
                "[{}] for {}: failed for {}",
                report.context,
                requester,
                join(&report.failed)
            );
        }
        Ok(())
    }
}

fn join(documents: &[docflow_domain::DocumentKey]) -> String {
    documents
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
