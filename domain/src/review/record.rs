//! Per-participant review records.

use crate::document::{DocumentKey, RevisionNumber};
use crate::participant::Participant;
use crate::review::step::ReviewStep;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Role a participant holds within one revision's review.
///
/// A revision may have any number of reviewers but at most one leader and
/// one approver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewRole {
    Reviewer,
    Leader,
    Approver,
}

impl ReviewRole {
    /// The step during which records of this role are active.
    pub fn step(&self) -> ReviewStep {
        match self {
            ReviewRole::Reviewer => ReviewStep::Reviewer,
            ReviewRole::Leader => ReviewStep::Leader,
            ReviewRole::Approver => ReviewStep::Approver,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewRole::Reviewer => "reviewer",
            ReviewRole::Leader => "leader",
            ReviewRole::Approver => "approver",
        }
    }
}

impl std::fmt::Display for ReviewRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived status of a review record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// The record's stage has not been reached yet.
    Pending,
    /// The record's stage is active and the participant has not acted.
    InProgress,
    /// The participant explicitly submitted their review.
    Reviewed,
    /// The stage was force-closed without a submission.
    NotReviewed,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::InProgress => "in_progress",
            ReviewStatus::Reviewed => "reviewed",
            ReviewStatus::NotReviewed => "not_reviewed",
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque reference to an uploaded comments attachment.
///
/// File storage is an external concern; the workflow only carries the
/// reference around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef(String);

impl AttachmentRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttachmentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a review record: (document, revision, participant, role).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    pub document: DocumentKey,
    pub revision: RevisionNumber,
    pub participant: Participant,
    pub role: ReviewRole,
}

/// One participant's review state within one stage of one revision.
///
/// Records are created when their revision's review starts and deleted only
/// by whole-revision cancellation. Status is not stored: it is derived from
/// the record's fields and the revision's current step, so a record can
/// never disagree with its revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub document: DocumentKey,
    pub revision: RevisionNumber,
    pub participant: Participant,
    pub role: ReviewRole,
    /// Set only when the participant explicitly submits.
    pub reviewed_on: Option<NaiveDate>,
    /// Set when the stage is force-closed without a submission.
    pub closed: bool,
    /// Set when the stage was sent back for rework; a reopened record reads
    /// as in-progress while its stage is active even if a prior submission
    /// exists (both fields stay visible as history).
    pub reopened: bool,
    pub comments: Option<AttachmentRef>,
}

impl ReviewRecord {
    pub fn new(
        document: DocumentKey,
        revision: RevisionNumber,
        participant: Participant,
        role: ReviewRole,
    ) -> Self {
        Self {
            document,
            revision,
            participant,
            role,
            reviewed_on: None,
            closed: false,
            reopened: false,
            comments: None,
        }
    }

    /// The record's identity tuple.
    pub fn identity(&self) -> RecordRef {
        RecordRef {
            document: self.document.clone(),
            revision: self.revision,
            participant: self.participant.clone(),
            role: self.role,
        }
    }

    /// Whether this record is the one `reference` points at.
    pub fn matches(&self, reference: &RecordRef) -> bool {
        self.document == reference.document
            && self.revision == reference.revision
            && self.participant == reference.participant
            && self.role == reference.role
    }

    /// Whether the record's stage is the revision's current step.
    pub fn is_active_at(&self, current_step: ReviewStep) -> bool {
        self.role.step() == current_step
    }

    /// Derive the record's status given the revision's current step.
    pub fn status(&self, current_step: ReviewStep) -> ReviewStatus {
        if self.reopened && !self.closed && self.is_active_at(current_step) {
            ReviewStatus::InProgress
        } else if self.reviewed_on.is_some() {
            ReviewStatus::Reviewed
        } else if self.closed {
            ReviewStatus::NotReviewed
        } else if self.is_active_at(current_step) {
            ReviewStatus::InProgress
        } else {
            ReviewStatus::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(role: ReviewRole) -> ReviewRecord {
        ReviewRecord::new("DOC-001".into(), RevisionNumber::new(1), "alice".into(), role)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fresh_reviewer_record_is_in_progress_at_reviewer_step() {
        let rec = record(ReviewRole::Reviewer);
        assert_eq!(rec.status(ReviewStep::Reviewer), ReviewStatus::InProgress);
    }

    #[test]
    fn test_fresh_leader_record_is_pending_until_its_step() {
        let rec = record(ReviewRole::Leader);
        assert_eq!(rec.status(ReviewStep::Reviewer), ReviewStatus::Pending);
        assert_eq!(rec.status(ReviewStep::Leader), ReviewStatus::InProgress);
    }

    #[test]
    fn test_submission_wins_over_activity() {
        let mut rec = record(ReviewRole::Reviewer);
        rec.reviewed_on = Some(date(2019, 3, 4));
        assert_eq!(rec.status(ReviewStep::Reviewer), ReviewStatus::Reviewed);
        assert_eq!(rec.status(ReviewStep::Leader), ReviewStatus::Reviewed);
    }

    #[test]
    fn test_forced_close_reads_not_reviewed() {
        let mut rec = record(ReviewRole::Reviewer);
        rec.closed = true;
        assert_eq!(rec.status(ReviewStep::Leader), ReviewStatus::NotReviewed);
    }

    #[test]
    fn test_submission_wins_over_forced_close() {
        let mut rec = record(ReviewRole::Reviewer);
        rec.reviewed_on = Some(date(2019, 3, 4));
        rec.closed = true;
        assert_eq!(rec.status(ReviewStep::Leader), ReviewStatus::Reviewed);
    }

    #[test]
    fn test_reopened_record_reads_in_progress_despite_prior_submission() {
        let mut rec = record(ReviewRole::Leader);
        rec.reviewed_on = Some(date(2019, 3, 4));
        rec.reopened = true;
        // While reworking, the stage is active again
        assert_eq!(rec.status(ReviewStep::Leader), ReviewStatus::InProgress);
        // The prior submission shows again once the stage moves on
        assert_eq!(rec.status(ReviewStep::Approver), ReviewStatus::Reviewed);
    }

    #[test]
    fn test_identity_and_matches() {
        let rec = record(ReviewRole::Approver);
        let reference = rec.identity();
        assert!(rec.matches(&reference));

        let other = RecordRef {
            participant: "bob".into(),
            ..reference
        };
        assert!(!rec.matches(&other));
    }
}
