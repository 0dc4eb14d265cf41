//! Per-revision review state.

use crate::document::{DocumentKey, DocumentType, RevisionNumber, RevisionRef};
use crate::participant::Participant;
use crate::review::step::ReviewStep;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Workflow state attached 1:1 to a document revision.
///
/// Created empty when the revision is created; mutated exclusively through
/// the functions in [`crate::review::transitions`]. The stage-close dates
/// are strictly ordered: the leader step can only close after the reviewers
/// step, and the review can only end after the leader step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionReviewState {
    pub document: DocumentKey,
    pub document_type: DocumentType,
    pub revision: RevisionNumber,

    pub review_start_date: Option<NaiveDate>,
    pub review_due_date: Option<NaiveDate>,
    pub review_end_date: Option<NaiveDate>,
    pub reviewers_step_closed: Option<NaiveDate>,
    pub leader_step_closed: Option<NaiveDate>,

    pub leader: Option<Participant>,
    pub approver: Option<Participant>,
    /// Insertion-ordered; duplicates are rejected by [`Self::add_reviewer`].
    pub reviewers: Vec<Participant>,
}

impl RevisionReviewState {
    /// Create the empty state for a revision: no participants, never started.
    pub fn new(document: impl Into<DocumentKey>, revision: impl Into<RevisionNumber>) -> Self {
        Self {
            document: document.into(),
            document_type: DocumentType::default(),
            revision: revision.into(),
            review_start_date: None,
            review_due_date: None,
            review_end_date: None,
            reviewers_step_closed: None,
            leader_step_closed: None,
            leader: None,
            approver: None,
            reviewers: Vec::new(),
        }
    }

    pub fn with_document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    pub fn with_leader(mut self, leader: impl Into<Participant>) -> Self {
        self.leader = Some(leader.into());
        self
    }

    pub fn with_approver(mut self, approver: impl Into<Participant>) -> Self {
        self.approver = Some(approver.into());
        self
    }

    pub fn with_reviewer(mut self, reviewer: impl Into<Participant>) -> Self {
        self.add_reviewer(reviewer.into());
        self
    }

    /// Add a reviewer, keeping insertion order. Returns false on duplicates.
    pub fn add_reviewer(&mut self, reviewer: Participant) -> bool {
        if self.reviewers.contains(&reviewer) {
            return false;
        }
        self.reviewers.push(reviewer);
        true
    }

    /// The revision this state is attached to.
    pub fn revision_ref(&self) -> RevisionRef {
        RevisionRef {
            document: self.document.clone(),
            revision: self.revision,
        }
    }

    /// The step the review is currently at.
    pub fn current_review_step(&self) -> ReviewStep {
        if self.review_end_date.is_some() {
            ReviewStep::Closed
        } else if self.review_start_date.is_none() {
            ReviewStep::Pending
        } else if self.reviewers_step_closed.is_none() {
            ReviewStep::Reviewer
        } else if self.leader_step_closed.is_none() {
            ReviewStep::Leader
        } else {
            ReviewStep::Approver
        }
    }

    pub fn is_at_review_step(&self, step: ReviewStep) -> bool {
        self.current_review_step() == step
    }

    /// Started and not yet ended.
    pub fn is_under_review(&self) -> bool {
        self.review_start_date.is_some() && self.review_end_date.is_none()
    }

    /// Under review with a due date strictly in the past. A review due today
    /// is not overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_under_review()
            && self
                .review_due_date
                .is_some_and(|due| due < today)
    }

    pub fn is_reviewer(&self, participant: &Participant) -> bool {
        self.reviewers.contains(participant)
    }

    pub fn is_leader(&self, participant: &Participant) -> bool {
        self.leader.as_ref() == Some(participant)
    }

    pub fn is_approver(&self, participant: &Participant) -> bool {
        self.approver.as_ref() == Some(participant)
    }
}
