//! Index sink port.
//!
//! When a review starts, a searchable snapshot of the revision is published
//! so list pages can query it without touching the store. Indexing failures
//! count against the revision that triggered them.

use async_trait::async_trait;
use docflow_domain::{DocumentType, RevisionRef};
use serde_json::Value;
use thiserror::Error;

/// Errors raised by index sink adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("index backend error: {0}")]
    Backend(String),
}

/// Port for publishing searchable revision snapshots.
#[async_trait]
pub trait IndexSink: Send + Sync {
    async fn index(
        &self,
        document_type: &DocumentType,
        revision: &RevisionRef,
        snapshot: Value,
    ) -> Result<(), IndexError>;
}

/// No-op sink for when indexing is disabled.
pub struct NoIndex;

#[async_trait]
impl IndexSink for NoIndex {
    async fn index(
        &self,
        _document_type: &DocumentType,
        _revision: &RevisionRef,
        _snapshot: Value,
    ) -> Result<(), IndexError> {
        Ok(())
    }
}
