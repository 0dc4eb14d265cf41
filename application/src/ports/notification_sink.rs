//! Notification sink port.
//!
//! Batch operations end by handing the requester a summary of what
//! succeeded and what failed. Rendering that summary into a human-readable
//! message (and delivering it) is a boundary concern behind this port.

use async_trait::async_trait;
use docflow_domain::{DocumentKey, Participant};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which batch operation a report comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchContext {
    StartReview,
    CloseReviewerStep,
}

impl BatchContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchContext::StartReview => "start_review",
            BatchContext::CloseReviewerStep => "close_reviewer_step",
        }
    }
}

impl std::fmt::Display for BatchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final outcome of one batch, as handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub context: BatchContext,
    pub succeeded: Vec<DocumentKey>,
    pub failed: Vec<DocumentKey>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }
}

/// Errors raised by notification sink adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("notification backend error: {0}")]
    Backend(String),
}

/// Port for delivering batch outcome summaries to a user.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, requester: &Participant, report: &BatchReport)
    -> Result<(), NotifyError>;
}

/// No-op sink for when nobody is listening.
pub struct NoNotifications;

#[async_trait]
impl NotificationSink for NoNotifications {
    async fn notify(
        &self,
        _requester: &Participant,
        _report: &BatchReport,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}
