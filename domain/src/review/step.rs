//! Review steps.

use serde::{Deserialize, Serialize};

/// The step a revision's review is currently at.
///
/// `Pending` means the review has not started; `Closed` means it has ended.
/// The three stages in between are strictly ordered and cannot be reordered
/// or extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStep {
    Pending,
    Reviewer,
    Leader,
    Approver,
    Closed,
}

impl ReviewStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStep::Pending => "pending",
            ReviewStep::Reviewer => "reviewer",
            ReviewStep::Leader => "leader",
            ReviewStep::Approver => "approver",
            ReviewStep::Closed => "closed",
        }
    }
}

impl std::fmt::Display for ReviewStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
