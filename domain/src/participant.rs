//! Review participants.

use serde::{Deserialize, Serialize};

/// A person taking part in a review, identified by an opaque account id.
///
/// Authentication and user profiles live outside this crate; the workflow
/// only ever compares participants for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant(String);

impl Participant {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Into<String>> From<T> for Participant {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}
