//! Start review batch use case.
//!
//! Drives a set of revisions through `start_review`, one at a time, in the
//! order supplied. Every failure is contained to its own target: the batch
//! always runs to completion and always ends with an ok/nok summary.

use crate::ports::clock::Clock;
use crate::ports::document_store::{DocumentStore, UnitOfWork};
use crate::ports::index_sink::IndexSink;
use crate::ports::notification_sink::{BatchContext, NotificationSink};
use crate::ports::progress::{BatchProgressNotifier, NoProgress};
use crate::use_cases::batch::{BatchSummary, percent, send_report};
use crate::use_cases::start_review::StartReviewError;
use chrono::{Duration, NaiveDate};
use docflow_domain::{Participant, RevisionRef, transitions};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Extra items added to the progress denominator so the bar stops short of
/// 100% while the final summarization still runs. A presentation device,
/// not a correctness requirement.
pub const DEFAULT_PROGRESS_PADDING: usize = 30;

/// Input for the StartReviewBatch use case
#[derive(Debug, Clone)]
pub struct StartReviewBatchInput {
    /// Who launched the batch; receives the final summary.
    pub requester: Participant,
    pub targets: Vec<RevisionRef>,
}

impl StartReviewBatchInput {
    pub fn new(requester: impl Into<Participant>, targets: Vec<RevisionRef>) -> Self {
        Self {
            requester: requester.into(),
            targets,
        }
    }
}

/// Use case for starting reviews in bulk.
pub struct StartReviewBatchUseCase {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    index: Arc<dyn IndexSink>,
    notifications: Arc<dyn NotificationSink>,
    progress_padding: usize,
    review_span_days: i64,
}

impl StartReviewBatchUseCase {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        index: Arc<dyn IndexSink>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            clock,
            index,
            notifications,
            progress_padding: DEFAULT_PROGRESS_PADDING,
            review_span_days: transitions::DEFAULT_REVIEW_SPAN_DAYS,
        }
    }

    pub fn with_progress_padding(mut self, padding: usize) -> Self {
        self.progress_padding = padding;
        self
    }

    /// Override how many days after the start date the reviews are due.
    pub fn with_review_span_days(mut self, days: i64) -> Self {
        self.review_span_days = days;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: StartReviewBatchInput) -> BatchSummary {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: StartReviewBatchInput,
        progress: &dyn BatchProgressNotifier,
    ) -> BatchSummary {
        let total = input.targets.len();
        let denominator = total + self.progress_padding;

        info!("Starting reviews for {} revisions", total);
        progress.on_batch_start(&BatchContext::StartReview, total);

        let at_date = self.clock.today();
        let mut summary = BatchSummary::new(BatchContext::StartReview);

        for (index, target) in input.targets.iter().enumerate() {
            match self.start_one(target, at_date).await {
                Ok(()) => {
                    debug!("Review started for {}", target);
                    summary.push_succeeded(target.document.clone());
                    progress.on_item_complete(&target.document, true);
                }
                Err(e) => {
                    warn!("Could not start the review for {}: {}", target, e);
                    summary.push_failed(target.document.clone(), e.to_string());
                    progress.on_item_complete(&target.document, false);
                }
            }
            progress.on_progress(percent(index + 1, denominator));
        }

        progress.on_batch_complete(&BatchContext::StartReview);
        send_report(self.notifications.as_ref(), &input.requester, &summary).await;

        info!(
            "Review start batch done: {} ok, {} nok",
            summary.succeeded.len(),
            summary.failed.len()
        );
        summary
    }

    async fn start_one(
        &self,
        target: &RevisionRef,
        at_date: NaiveDate,
    ) -> Result<(), StartReviewError> {
        let mut state = self.store.get_revision_state(target).await?;
        let mut records = self.store.list_records(target).await?;

        let due_date = at_date + Duration::days(self.review_span_days);
        transitions::start_review(&mut state, &mut records, at_date, Some(due_date))?;

        self.store
            .commit(
                UnitOfWork::new()
                    .with_state(state.clone())
                    .with_records(records),
            )
            .await?;

        let snapshot = serde_json::to_value(&state)?;
        self.index
            .index(&state.document_type, target, snapshot)
            .await?;
        Ok(())
    }
}
