//! Post review use case (one participant submits).

use crate::ports::clock::Clock;
use crate::ports::document_store::{DocumentStore, StoreError};
use chrono::NaiveDate;
use docflow_domain::{AttachmentRef, RecordRef, ReviewRecord, RevisionRef, transitions};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when posting a review.
#[derive(Error, Debug)]
pub enum PostReviewError {
    #[error("no review record for {} as {} on {} rev {}",
        .0.participant, .0.role, .0.document, .0.revision)]
    RecordNotFound(RecordRef),

    #[error(transparent)]
    Transition(#[from] docflow_domain::InvalidTransition),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for the PostReview use case
#[derive(Debug, Clone)]
pub struct PostReviewInput {
    pub record: RecordRef,
    pub comments: Option<AttachmentRef>,
    /// Submission date; defaults to today.
    pub at_date: Option<NaiveDate>,
}

impl PostReviewInput {
    pub fn new(record: RecordRef) -> Self {
        Self {
            record,
            comments: None,
            at_date: None,
        }
    }

    pub fn with_comments(mut self, comments: AttachmentRef) -> Self {
        self.comments = Some(comments);
        self
    }
}

/// Use case for recording one participant's review submission.
pub struct PostReviewUseCase {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl PostReviewUseCase {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(&self, input: PostReviewInput) -> Result<ReviewRecord, PostReviewError> {
        let revision = RevisionRef {
            document: input.record.document.clone(),
            revision: input.record.revision,
        };
        let state = self.store.get_revision_state(&revision).await?;
        let mut records = self.store.list_records(&revision).await?;

        let record = records
            .iter_mut()
            .find(|r| r.matches(&input.record))
            .ok_or_else(|| PostReviewError::RecordNotFound(input.record.clone()))?;

        let at_date = input.at_date.unwrap_or_else(|| self.clock.today());
        transitions::post_review(&state, record, input.comments, at_date)?;

        self.store.save_record(record).await?;

        info!(
            "{} posted their {} review for {}",
            record.participant, record.role, revision
        );
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use crate::use_cases::start_review::{StartReviewInput, StartReviewUseCase};
    use crate::use_cases::testing::{FakeStore, today};
    use docflow_domain::{ReviewRole, ReviewStatus, ReviewStep, RevisionReviewState};

    async fn store_under_review() -> Arc<FakeStore> {
        let store = Arc::new(FakeStore::new());
        store.seed(
            RevisionReviewState::new("DOC-001", 1)
                .with_leader("lucie")
                .with_reviewer("alice"),
        );
        StartReviewUseCase::new(store.clone(), Arc::new(FixedClock(today())))
            .execute(StartReviewInput::new(RevisionRef::new("DOC-001", 1)))
            .await
            .unwrap();
        store
    }

    fn alice_ref() -> RecordRef {
        RecordRef {
            document: "DOC-001".into(),
            revision: 1.into(),
            participant: "alice".into(),
            role: ReviewRole::Reviewer,
        }
    }

    #[tokio::test]
    async fn test_post_review_persists_submission() {
        let store = store_under_review().await;
        let use_case = PostReviewUseCase::new(store.clone(), Arc::new(FixedClock(today())));

        let record = use_case
            .execute(
                PostReviewInput::new(alice_ref())
                    .with_comments(AttachmentRef::new("uploads/alice.pdf")),
            )
            .await
            .unwrap();

        assert_eq!(record.reviewed_on, Some(today()));
        assert_eq!(record.status(ReviewStep::Reviewer), ReviewStatus::Reviewed);

        let stored = store.records_of(&RevisionRef::new("DOC-001", 1));
        let alice = stored.iter().find(|r| r.matches(&alice_ref())).unwrap();
        assert_eq!(alice.reviewed_on, Some(today()));
        assert_eq!(alice.comments, Some(AttachmentRef::new("uploads/alice.pdf")));
    }

    #[tokio::test]
    async fn test_post_review_twice_is_rejected() {
        let store = store_under_review().await;
        let use_case = PostReviewUseCase::new(store, Arc::new(FixedClock(today())));

        use_case
            .execute(PostReviewInput::new(alice_ref()))
            .await
            .unwrap();
        let err = use_case
            .execute(PostReviewInput::new(alice_ref()))
            .await
            .unwrap_err();
        assert!(matches!(err, PostReviewError::Transition(_)));
    }

    #[tokio::test]
    async fn test_post_review_unknown_record() {
        let store = store_under_review().await;
        let use_case = PostReviewUseCase::new(store, Arc::new(FixedClock(today())));

        let reference = RecordRef {
            participant: "mallory".into(),
            ..alice_ref()
        };
        let err = use_case
            .execute(PostReviewInput::new(reference))
            .await
            .unwrap_err();
        assert!(matches!(err, PostReviewError::RecordNotFound(_)));
    }
}
