//! Send back to leader use case (rework loop).

use crate::ports::document_store::{DocumentStore, StoreError, UnitOfWork};
use docflow_domain::{RevisionRef, RevisionReviewState, transitions};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when sending a review back to the leader.
#[derive(Error, Debug)]
pub enum SendBackError {
    #[error(transparent)]
    Transition(#[from] docflow_domain::InvalidTransition),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for the SendBack use case
#[derive(Debug, Clone)]
pub struct SendBackInput {
    pub revision: RevisionRef,
}

impl SendBackInput {
    pub fn new(revision: RevisionRef) -> Self {
        Self { revision }
    }
}

/// Use case for reopening the leader step of a review that has not ended.
pub struct SendBackUseCase {
    store: Arc<dyn DocumentStore>,
}

impl SendBackUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        input: SendBackInput,
    ) -> Result<RevisionReviewState, SendBackError> {
        let mut state = self.store.get_revision_state(&input.revision).await?;
        let mut records = self.store.list_records(&input.revision).await?;

        transitions::send_back_to_leader_step(&mut state, &mut records)?;

        self.store
            .commit(
                UnitOfWork::new()
                    .with_state(state.clone())
                    .with_records(records),
            )
            .await?;

        info!("Review for {} sent back to the leader step", input.revision);
        Ok(state)
    }
}
