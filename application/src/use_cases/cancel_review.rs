//! Cancel review use case.

use crate::ports::document_store::{DocumentStore, StoreError, UnitOfWork};
use docflow_domain::{RevisionRef, RevisionReviewState, transitions};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when cancelling a review.
#[derive(Error, Debug)]
pub enum CancelReviewError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for the CancelReview use case
#[derive(Debug, Clone)]
pub struct CancelReviewInput {
    pub revision: RevisionRef,
}

impl CancelReviewInput {
    pub fn new(revision: RevisionRef) -> Self {
        Self { revision }
    }
}

/// Use case for cancelling a revision's review.
///
/// Deletes every record and resets the workflow dates; the revision can be
/// reviewed again afterwards. A no-op on a review that never started.
pub struct CancelReviewUseCase {
    store: Arc<dyn DocumentStore>,
}

impl CancelReviewUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        input: CancelReviewInput,
    ) -> Result<RevisionReviewState, CancelReviewError> {
        let mut state = self.store.get_revision_state(&input.revision).await?;
        let mut records = self.store.list_records(&input.revision).await?;

        transitions::cancel_review(&mut state, &mut records);

        self.store
            .commit(
                UnitOfWork::new()
                    .with_state(state.clone())
                    .purging_records_of(input.revision.clone()),
            )
            .await?;

        info!("Review cancelled for {}", input.revision);
        Ok(state)
    }
}
