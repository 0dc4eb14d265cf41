//! Document store port.
//!
//! Persistence of revisions and review records lives outside this crate.
//! The store exposes reads plus a single [`DocumentStore::commit`] that
//! applies a [`UnitOfWork`] all-or-nothing: use cases stage every mutation
//! of one transition in memory and persist it in one commit, so a failed
//! commit leaves nothing half-written.

use async_trait::async_trait;
use docflow_domain::{ReviewRecord, RevisionRef, RevisionReviewState};
use thiserror::Error;

/// Errors raised by document store adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no review state for {0}")]
    NotFound(RevisionRef),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// A set of writes to be persisted atomically.
///
/// Record writes are upserts keyed by the record identity
/// (document, revision, participant, role). `purge_records_of` removes
/// every record of one revision before the upserts apply; it exists for
/// whole-revision cancellation.
#[derive(Debug, Clone, Default)]
pub struct UnitOfWork {
    pub state: Option<RevisionReviewState>,
    pub records: Vec<ReviewRecord>,
    pub purge_records_of: Option<RevisionRef>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(mut self, state: RevisionReviewState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_record(mut self, record: ReviewRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_records(mut self, records: Vec<ReviewRecord>) -> Self {
        self.records.extend(records);
        self
    }

    pub fn purging_records_of(mut self, revision: RevisionRef) -> Self {
        self.purge_records_of = Some(revision);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.records.is_empty() && self.purge_records_of.is_none()
    }
}

/// Port for reading and persisting review state.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load the review state attached to a revision.
    async fn get_revision_state(
        &self,
        revision: &RevisionRef,
    ) -> Result<RevisionReviewState, StoreError>;

    /// List every review record of a revision.
    async fn list_records(&self, revision: &RevisionRef) -> Result<Vec<ReviewRecord>, StoreError>;

    /// Persist a unit of work atomically.
    async fn commit(&self, unit: UnitOfWork) -> Result<(), StoreError>;

    /// Persist a single state write.
    async fn save_state(&self, state: &RevisionReviewState) -> Result<(), StoreError> {
        self.commit(UnitOfWork::new().with_state(state.clone())).await
    }

    /// Persist a single record write.
    async fn save_record(&self, record: &ReviewRecord) -> Result<(), StoreError> {
        self.commit(UnitOfWork::new().with_record(record.clone())).await
    }
}
