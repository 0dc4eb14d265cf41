//! In-memory port fakes shared by the use case tests.

use crate::ports::document_store::{DocumentStore, StoreError, UnitOfWork};
use crate::ports::index_sink::{IndexError, IndexSink};
use crate::ports::notification_sink::{BatchReport, NotificationSink, NotifyError};
use crate::ports::progress::BatchProgressNotifier;
use async_trait::async_trait;
use chrono::NaiveDate;
use docflow_domain::{
    DocumentKey, DocumentType, Participant, ReviewRecord, RevisionRef, RevisionReviewState,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub(crate) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 6, 17).unwrap()
}

#[derive(Default)]
struct StoreInner {
    states: HashMap<RevisionRef, RevisionReviewState>,
    records: HashMap<RevisionRef, Vec<ReviewRecord>>,
}

/// In-memory document store with an all-or-nothing commit and a way to make
/// commits fail for selected documents.
#[derive(Default)]
pub(crate) struct FakeStore {
    inner: Mutex<StoreInner>,
    failing_commits: Mutex<HashSet<DocumentKey>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, state: RevisionReviewState) {
        let mut inner = self.inner.lock().unwrap();
        inner.states.insert(state.revision_ref(), state);
    }

    /// Make every commit touching `document` fail.
    pub fn fail_commits_for(&self, document: DocumentKey) {
        self.failing_commits.lock().unwrap().insert(document);
    }

    pub fn state_of(&self, revision: &RevisionRef) -> RevisionReviewState {
        self.inner.lock().unwrap().states[revision].clone()
    }

    pub fn records_of(&self, revision: &RevisionRef) -> Vec<ReviewRecord> {
        self.inner
            .lock()
            .unwrap()
            .records
            .get(revision)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn get_revision_state(
        &self,
        revision: &RevisionRef,
    ) -> Result<RevisionReviewState, StoreError> {
        self.inner
            .lock()
            .unwrap()
            .states
            .get(revision)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(revision.clone()))
    }

    async fn list_records(&self, revision: &RevisionRef) -> Result<Vec<ReviewRecord>, StoreError> {
        Ok(self.records_of(revision))
    }

    async fn commit(&self, unit: UnitOfWork) -> Result<(), StoreError> {
        let touched = unit
            .state
            .as_ref()
            .map(|s| s.document.clone())
            .or_else(|| unit.records.first().map(|r| r.document.clone()));
        if let Some(document) = touched
            && self.failing_commits.lock().unwrap().contains(&document)
        {
            return Err(StoreError::Backend("simulated commit failure".into()));
        }

        let mut inner = self.inner.lock().unwrap();
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
            match records.iter_mut().find(|r| {
                r.participant == record.participant && r.role == record.role
            }) {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
        }
        Ok(())
    }
}

/// Index sink remembering everything it indexed; can be set to fail for a
/// document.
#[derive(Default)]
pub(crate) struct FakeIndex {
    entries: Mutex<Vec<(RevisionRef, Value)>>,
    failing: Mutex<HashSet<DocumentKey>>,
}

impl FakeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, document: DocumentKey) {
        self.failing.lock().unwrap().insert(document);
    }

    pub fn entries(&self) -> Vec<(RevisionRef, Value)> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndexSink for FakeIndex {
    async fn index(
        &self,
        _document_type: &DocumentType,
        revision: &RevisionRef,
        snapshot: Value,
    ) -> Result<(), IndexError> {
        if self.failing.lock().unwrap().contains(&revision.document) {
            return Err(IndexError::Backend("simulated index failure".into()));
        }
        self.entries
            .lock()
            .unwrap()
            .push((revision.clone(), snapshot));
        Ok(())
    }
}

/// Notification sink remembering every delivered report.
#[derive(Default)]
pub(crate) struct FakeNotifications {
    reports: Mutex<Vec<(Participant, BatchReport)>>,
}

impl FakeNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(Participant, BatchReport)> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for FakeNotifications {
    async fn notify(
        &self,
        requester: &Participant,
        report: &BatchReport,
    ) -> Result<(), NotifyError> {
        self.reports
            .lock()
            .unwrap()
            .push((requester.clone(), report.clone()));
        Ok(())
    }
}

/// Progress notifier capturing the percentage stream and per-item outcomes.
#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub percents: Mutex<Vec<f64>>,
    pub items: Mutex<Vec<(DocumentKey, bool)>>,
    pub totals: Mutex<Vec<usize>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percents(&self) -> Vec<f64> {
        self.percents.lock().unwrap().clone()
    }

    pub fn items(&self) -> Vec<(DocumentKey, bool)> {
        self.items.lock().unwrap().clone()
    }
}

impl BatchProgressNotifier for RecordingProgress {
    fn on_batch_start(&self, _context: &crate::ports::notification_sink::BatchContext, total: usize) {
        self.totals.lock().unwrap().push(total);
    }

    fn on_item_complete(&self, document: &DocumentKey, success: bool) {
        self.items.lock().unwrap().push((document.clone(), success));
    }

    fn on_progress(&self, percent: f64) {
        self.percents.lock().unwrap().push(percent);
    }

    fn on_batch_complete(&self, _context: &crate::ports::notification_sink::BatchContext) {}
}
