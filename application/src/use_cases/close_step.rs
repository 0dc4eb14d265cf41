//! Close step use case.
//!
//! Closing is cascading and idempotent: closing the leader step first
//! closes the reviewers step if needed, and ending the review closes both.

use crate::ports::clock::Clock;
use crate::ports::document_store::{DocumentStore, StoreError, UnitOfWork};
use chrono::NaiveDate;
use docflow_domain::{RevisionRef, RevisionReviewState, transitions};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Which close transition to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTarget {
    ReviewersStep,
    LeaderStep,
    Review,
}

/// Errors that can occur when closing a step.
#[derive(Error, Debug)]
pub enum CloseStepError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for the CloseStep use case
#[derive(Debug, Clone)]
pub struct CloseStepInput {
    pub revision: RevisionRef,
    pub target: CloseTarget,
    /// Close date; defaults to today.
    pub at_date: Option<NaiveDate>,
}

impl CloseStepInput {
    pub fn new(revision: RevisionRef, target: CloseTarget) -> Self {
        Self {
            revision,
            target,
            at_date: None,
        }
    }
}

/// Use case for force-closing a review step (or the whole review).
pub struct CloseStepUseCase {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl CloseStepUseCase {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(
        &self,
        input: CloseStepInput,
    ) -> Result<RevisionReviewState, CloseStepError> {
        let mut state = self.store.get_revision_state(&input.revision).await?;
        let mut records = self.store.list_records(&input.revision).await?;

        let at_date = input.at_date.unwrap_or_else(|| self.clock.today());
        match input.target {
            CloseTarget::ReviewersStep => {
                transitions::end_reviewers_step(&mut state, &mut records, at_date)
            }
            CloseTarget::LeaderStep => {
                transitions::end_leader_step(&mut state, &mut records, at_date)
            }
            CloseTarget::Review => transitions::end_review(&mut state, &mut records, at_date),
        }

        self.store
            .commit(
                UnitOfWork::new()
                    .with_state(state.clone())
                    .with_records(records),
            )
            .await?;

        info!(
            "{:?} closed for {}; review now at the {} step",
            input.target,
            input.revision,
            state.current_review_step()
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use crate::use_cases::start_review::{StartReviewInput, StartReviewUseCase};
    use crate::use_cases::testing::{FakeStore, today};
    use docflow_domain::{ReviewStep, RevisionReviewState};

    async fn store_under_review() -> Arc<FakeStore> {
        let store = Arc::new(FakeStore::new());
        store.seed(
            RevisionReviewState::new("DOC-001", 1)
                .with_leader("lucie")
                .with_approver("paul")
                .with_reviewer("alice"),
        );
        StartReviewUseCase::new(store.clone(), Arc::new(FixedClock(today())))
            .execute(StartReviewInput::new(RevisionRef::new("DOC-001", 1)))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_close_reviewers_step() {
        let store = store_under_review().await;
        let use_case = CloseStepUseCase::new(store.clone(), Arc::new(FixedClock(today())));

        let state = use_case
            .execute(CloseStepInput::new(
                RevisionRef::new("DOC-001", 1),
                CloseTarget::ReviewersStep,
            ))
            .await
            .unwrap();

        assert_eq!(state.current_review_step(), ReviewStep::Leader);
        assert_eq!(
            store.state_of(&RevisionRef::new("DOC-001", 1)).reviewers_step_closed,
            Some(today())
        );
    }

    #[tokio::test]
    async fn test_close_review_cascades_and_persists_records() {
        let store = store_under_review().await;
        let use_case = CloseStepUseCase::new(store.clone(), Arc::new(FixedClock(today())));

        let state = use_case
            .execute(CloseStepInput::new(
                RevisionRef::new("DOC-001", 1),
                CloseTarget::Review,
            ))
            .await
            .unwrap();

        assert_eq!(state.current_review_step(), ReviewStep::Closed);
        let records = store.records_of(&RevisionRef::new("DOC-001", 1));
        assert!(records.iter().all(|r| r.closed));
    }
}
