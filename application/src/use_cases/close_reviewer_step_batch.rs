//! Close reviewer step batch use case.
//!
//! A reviewer closes several of their own pending reviews at once, without
//! comments. Records that are not the requester's, not reviewer records, or
//! not in progress are skipped outright — they count as neither success nor
//! failure. Each eligible record is processed inside one atomic unit of
//! work: the silent submission, plus the reviewers-step close when that
//! record was the last one open, persist together or not at all.

use crate::ports::clock::Clock;
use crate::ports::document_store::{DocumentStore, StoreError, UnitOfWork};
use crate::ports::notification_sink::{BatchContext, NotificationSink};
use crate::ports::progress::{BatchProgressNotifier, NoProgress};
use crate::use_cases::batch::{BatchSummary, percent, send_report};
use chrono::NaiveDate;
use docflow_domain::{
    Participant, RecordRef, ReviewRole, ReviewStatus, RevisionRef, transitions,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Input for the CloseReviewerStepBatch use case
#[derive(Debug, Clone)]
pub struct CloseReviewerStepBatchInput {
    /// Whose records may be closed; also receives the final summary.
    pub requester: Participant,
    pub records: Vec<RecordRef>,
}

impl CloseReviewerStepBatchInput {
    pub fn new(requester: impl Into<Participant>, records: Vec<RecordRef>) -> Self {
        Self {
            requester: requester.into(),
            records,
        }
    }
}

#[derive(Error, Debug)]
enum CloseRecordError {
    #[error("record disappeared while the batch was running")]
    RecordVanished,

    #[error(transparent)]
    Transition(#[from] docflow_domain::InvalidTransition),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Use case for closing a reviewer's own review records in bulk.
pub struct CloseReviewerStepBatchUseCase {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    notifications: Arc<dyn NotificationSink>,
}

impl CloseReviewerStepBatchUseCase {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            clock,
            notifications,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: CloseReviewerStepBatchInput) -> BatchSummary {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: CloseReviewerStepBatchInput,
        progress: &dyn BatchProgressNotifier,
    ) -> BatchSummary {
        info!(
            "Closing up to {} reviews for {}",
            input.records.len(),
            input.requester
        );

        let at_date = self.clock.today();
        let mut summary = BatchSummary::new(BatchContext::CloseReviewerStep);

        let eligible = self.resolve_eligible(&input, &mut summary).await;
        let total = eligible.len();
        progress.on_batch_start(&BatchContext::CloseReviewerStep, total);

        for (index, reference) in eligible.iter().enumerate() {
            match self.close_one(reference, at_date).await {
                Ok(()) => {
                    debug!("Closed review of {} for {}", reference.document, reference.participant);
                    summary.push_succeeded(reference.document.clone());
                    progress.on_item_complete(&reference.document, true);
                }
                Err(e) => {
                    warn!(
                        "Could not close the review of {} for {}: {}",
                        reference.document, reference.participant, e
                    );
                    summary.push_failed(reference.document.clone(), e.to_string());
                    progress.on_item_complete(&reference.document, false);
                }
            }
            progress.on_progress(percent(index + 1, total));
        }

        progress.on_batch_complete(&BatchContext::CloseReviewerStep);
        send_report(self.notifications.as_ref(), &input.requester, &summary).await;

        info!(
            "Review close batch done: {} ok, {} nok",
            summary.succeeded.len(),
            summary.failed.len()
        );
        summary
    }

    /// Keep only in-progress reviewer records owned by the requester.
    /// Non-matching records are skipped silently; a record we cannot even
    /// inspect is a failure of that record's target.
    async fn resolve_eligible(
        &self,
        input: &CloseReviewerStepBatchInput,
        summary: &mut BatchSummary,
    ) -> Vec<RecordRef> {
        let mut eligible = Vec::new();
        for reference in &input.records {
            if reference.role != ReviewRole::Reviewer || reference.participant != input.requester {
                debug!(
                    "Skipping {} record of {} on {}: not the requester's reviewer record",
                    reference.role, reference.participant, reference.document
                );
                continue;
            }
            match self.is_in_progress(reference).await {
                Ok(true) => eligible.push(reference.clone()),
                Ok(false) => {
                    debug!(
                        "Skipping record of {} on {}: not in progress",
                        reference.participant, reference.document
                    );
                }
                Err(e) => {
                    warn!("Could not inspect record on {}: {}", reference.document, e);
                    summary.push_failed(reference.document.clone(), e.to_string());
                }
            }
        }
        eligible
    }

    async fn is_in_progress(&self, reference: &RecordRef) -> Result<bool, StoreError> {
        let revision = revision_of(reference);
        let state = self.store.get_revision_state(&revision).await?;
        let records = self.store.list_records(&revision).await?;
        let step = state.current_review_step();
        Ok(records
            .iter()
            .find(|r| r.matches(reference))
            .is_some_and(|r| r.status(step) == ReviewStatus::InProgress))
    }

    /// One atomic unit: silent submission, then the reviewers-step close if
    /// this was the last reviewer record still open.
    async fn close_one(
        &self,
        reference: &RecordRef,
        at_date: NaiveDate,
    ) -> Result<(), CloseRecordError> {
        let revision = revision_of(reference);
        let mut state = self.store.get_revision_state(&revision).await?;
        let mut records = self.store.list_records(&revision).await?;

        let position = records
            .iter()
            .position(|r| r.matches(reference))
            .ok_or(CloseRecordError::RecordVanished)?;

        transitions::post_review(&state, &mut records[position], None, at_date)?;

        let done = records
            .iter()
            .filter(|r| r.role == ReviewRole::Reviewer)
            .filter(|r| r.closed || r.reviewed_on.is_some())
            .count();
        if done == state.reviewers.len() {
            debug!("All reviewers done for {}; closing the reviewers step", revision);
            transitions::end_reviewers_step(&mut state, &mut records, at_date);
        }

        self.store
            .commit(UnitOfWork::new().with_state(state).with_records(records))
            .await?;
        Ok(())
    }
}

fn revision_of(reference: &RecordRef) -> RevisionRef {
    RevisionRef {
        document: reference.document.clone(),
        revision: reference.revision,
    }
}
