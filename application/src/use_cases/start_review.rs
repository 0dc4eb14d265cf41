//! Start review use case (single revision).

use crate::ports::clock::Clock;
use crate::ports::document_store::{DocumentStore, StoreError, UnitOfWork};
use crate::ports::index_sink::{IndexError, IndexSink, NoIndex};
use chrono::{Duration, NaiveDate};
use docflow_domain::{RevisionRef, RevisionReviewState, transitions};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when starting one review.
#[derive(Error, Debug)]
pub enum StartReviewError {
    #[error(transparent)]
    Transition(#[from] docflow_domain::InvalidTransition),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("failed to snapshot revision state: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Input for the StartReview use case
#[derive(Debug, Clone)]
pub struct StartReviewInput {
    pub revision: RevisionRef,
    /// Start date; defaults to today.
    pub at_date: Option<NaiveDate>,
    /// Due date; defaults to the start date plus the standard review span.
    pub due_date: Option<NaiveDate>,
}

impl StartReviewInput {
    pub fn new(revision: RevisionRef) -> Self {
        Self {
            revision,
            at_date: None,
            due_date: None,
        }
    }

    pub fn at(mut self, at_date: NaiveDate) -> Self {
        self.at_date = Some(at_date);
        self
    }

    pub fn due(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Use case for starting the review of one revision.
///
/// On success the revision's searchable snapshot is published through the
/// index sink.
pub struct StartReviewUseCase {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    index: Arc<dyn IndexSink>,
    review_span_days: i64,
}

impl StartReviewUseCase {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            index: Arc::new(NoIndex),
            review_span_days: transitions::DEFAULT_REVIEW_SPAN_DAYS,
        }
    }

    pub fn with_index_sink(mut self, index: Arc<dyn IndexSink>) -> Self {
        self.index = index;
        self
    }

    /// Override how many days after the start date the review is due.
    pub fn with_review_span_days(mut self, days: i64) -> Self {
        self.review_span_days = days;
        self
    }

    pub async fn execute(
        &self,
        input: StartReviewInput,
    ) -> Result<RevisionReviewState, StartReviewError> {
        let mut state = self.store.get_revision_state(&input.revision).await?;
        let mut records = self.store.list_records(&input.revision).await?;

        let at_date = input.at_date.unwrap_or_else(|| self.clock.today());
        let due_date = input
            .due_date
            .unwrap_or(at_date + Duration::days(self.review_span_days));
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
            .index(&state.document_type, &input.revision, snapshot)
            .await?;

        info!("Review started for {}", input.revision);
        Ok(state)
    }
}
