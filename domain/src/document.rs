//! Document-side value objects.
//!
//! The review workflow never owns documents — it only references them. A
//! [`DocumentKey`] identifies a document within its category, a
//! [`RevisionNumber`] selects one revision of it, and a [`RevisionRef`]
//! bundles both into the identity a review state is attached to.

use serde::{Deserialize, Serialize};

/// Opaque document identifier (e.g. a document key like `FAC-PROC-0042`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentKey(String);

impl DocumentKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Into<String>> From<T> for DocumentKey {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

/// Document type label, used when publishing searchable snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentType(String);

impl DocumentType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        Self("document".to_string())
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Revision number within a document (1-indexed).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct RevisionNumber(pub u32);

impl RevisionNumber {
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RevisionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RevisionNumber {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

/// Reference to one revision of one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevisionRef {
    pub document: DocumentKey,
    pub revision: RevisionNumber,
}

impl RevisionRef {
    pub fn new(document: impl Into<DocumentKey>, revision: impl Into<RevisionNumber>) -> Self {
        Self {
            document: document.into(),
            revision: revision.into(),
        }
    }
}

impl std::fmt::Display for RevisionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rev {}", self.document, self.revision)
    }
}
