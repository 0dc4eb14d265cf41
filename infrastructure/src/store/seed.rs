//! Workspace seed files.
//!
//! The binary has no durable store of its own; it loads the documents to
//! operate on from a small TOML file:
//!
//! ```toml
//! [[documents]]
//! key = "FAC-PROC-0042"
//! type = "procedure"
//! revision = 1
//! leader = "lucie"
//! approver = "paul"
//! reviewers = ["alice", "bob"]
//! ```

use crate::store::memory::MemoryDocumentStore;
use docflow_domain::{DocumentType, RevisionReviewState};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a seed file.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("could not read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse seed file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedDocument {
    pub key: String,
    #[serde(rename = "type")]
    pub document_type: Option<String>,
    #[serde(default = "first_revision")]
    pub revision: u32,
    pub leader: Option<String>,
    pub approver: Option<String>,
    #[serde(default)]
    pub reviewers: Vec<String>,
}

fn first_revision() -> u32 {
    1
}

/// A parsed workspace seed file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SeedFile {
    #[serde(default)]
    pub documents: Vec<SeedDocument>,
}

impl SeedFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Insert every seeded document's empty review state into the store.
    pub fn apply(&self, store: &MemoryDocumentStore) {
        for document in &self.documents {
            store.insert_state(document.to_state());
        }
    }
}

impl SeedDocument {
    fn to_state(&self) -> RevisionReviewState {
        let mut state = RevisionReviewState::new(self.key.as_str(), self.revision);
        if let Some(document_type) = &self.document_type {
            state = state.with_document_type(DocumentType::new(document_type));
        }
        if let Some(leader) = &self.leader {
            state = state.with_leader(leader.as_str());
        }
        if let Some(approver) = &self.approver {
            state = state.with_approver(approver.as_str());
        }
        for reviewer in &self.reviewers {
            state.add_reviewer(reviewer.as_str().into());
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docflow_application::DocumentStore;
    use docflow_domain::RevisionRef;
    use std::io::Write;

    const SEED: &str = r#"
[[documents]]
key = "FAC-PROC-0042"
type = "procedure"
revision = 2
leader = "lucie"
approver = "paul"
reviewers = ["alice", "bob"]

[[documents]]
key = "FAC-DWG-0007"
leader = "lucie"
"#;

    #[tokio::test]
    async fn test_seed_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workspace.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SEED.as_bytes()).unwrap();
        drop(file);

        let seed = SeedFile::load(&path).unwrap();
        assert_eq!(seed.documents.len(), 2);

        let store = MemoryDocumentStore::new();
        seed.apply(&store);

        let state = store
            .get_revision_state(&RevisionRef::new("FAC-PROC-0042", 2))
            .await
            .unwrap();
        assert_eq!(state.leader, Some("lucie".into()));
        assert_eq!(state.reviewers.len(), 2);
        assert_eq!(state.document_type.as_str(), "procedure");

        // Defaults: revision 1, generic document type, no participants
        let state = store
            .get_revision_state(&RevisionRef::new("FAC-DWG-0007", 1))
            .await
            .unwrap();
        assert!(state.approver.is_none());
        assert!(state.reviewers.is_empty());
    }

    #[test]
    fn test_malformed_seed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workspace.toml");
        std::fs::write(&path, "documents = 12").unwrap();

        assert!(matches!(SeedFile::load(&path), Err(SeedError::Parse(_))));
    }
}
