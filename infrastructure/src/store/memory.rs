//! In-memory document store.

use async_trait::async_trait;
use docflow_application::{DocumentStore, StoreError, UnitOfWork};
use docflow_domain::{ReviewRecord, RevisionRef, RevisionReviewState};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
struct Inner {
    states: HashMap<RevisionRef, RevisionReviewState>,
    records: HashMap<RevisionRef, Vec<ReviewRecord>>,
}

/// Document store keeping everything in process memory.
///
/// A [`UnitOfWork`] is applied inside one write lock, so concurrent readers
/// never observe a half-applied unit. Writes are last-write-wins over whole
/// values, which keeps replayed closing transitions idempotent.
#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<Inner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a revision's review state, e.g. when seeding a workspace.
    pub fn insert_state(&self, state: RevisionReviewState) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.states.insert(state.revision_ref(), state);
    }

    /// Every known revision, in no particular order.
    pub fn revisions(&self) -> Vec<RevisionRef> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner.states.keys().cloned().collect()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_revision_state(
        &self,
        revision: &RevisionRef,
    ) -> Result<RevisionReviewState, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner
            .states
            .get(revision)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(revision.clone()))
    }

    async fn list_records(&self, revision: &RevisionRef) -> Result<Vec<ReviewRecord>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.records.get(revision).cloned().unwrap_or_default())
    }

    async fn commit(&self, unit: UnitOfWork) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");

        if let Some(revision) = &unit.purge_records_of {
            inner.records.remove(revision);
        }
        if let Some(state) = unit.state {
            inner.states.insert(state.revision_ref(), state);
        }
        for record in unit.records {
            let revision = RevisionRef {
                document: record.document.clone(),
                revision: record.revision,
            };
            let records = inner.records.entry(revision).or_default();
            match records
                .iter_mut()
                .find(|r| r.participant == record.participant && r.role == record.role)
            {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
        }
        Ok(())
    }
}
