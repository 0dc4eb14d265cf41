//! Stateless review transitions.
//!
//! Each function mutates one [`RevisionReviewState`] and its records as a
//! single unit; persisting the result atomically is the caller's concern.
//! The closing transitions are idempotent, and the cascades
//! ([`end_leader_step`], [`end_review`]) are built by composing the smaller
//! transitions so closing semantics have a single source of truth.

use crate::review::error::InvalidTransition;
use crate::review::record::{AttachmentRef, ReviewRecord, ReviewRole};
use crate::review::state::RevisionReviewState;
use chrono::{Duration, NaiveDate};

/// Default review span: a review started today is due 13 days later.
pub const DEFAULT_REVIEW_SPAN_DAYS: i64 = 13;

/// A review can (re)start iff a leader is assigned and it never started.
pub fn can_be_reviewed(state: &RevisionReviewState) -> bool {
    state.leader.is_some() && state.review_start_date.is_none()
}

/// Start the review: stamp the start and due dates and create one record
/// per participant. Reviewer records become active immediately; the leader
/// and approver records stay pending until their stage opens. A revision
/// with no reviewers skips the reviewers stage entirely.
pub fn start_review(
    state: &mut RevisionReviewState,
    records: &mut Vec<ReviewRecord>,
    at_date: NaiveDate,
    due_date: Option<NaiveDate>,
) -> Result<(), InvalidTransition> {
    if let Some(started) = state.review_start_date {
        return Err(InvalidTransition::AlreadyStarted(started));
    }
    let Some(leader) = state.leader.clone() else {
        return Err(InvalidTransition::NoLeader);
    };

    state.review_start_date = Some(at_date);
    state.review_due_date =
        Some(due_date.unwrap_or(at_date + Duration::days(DEFAULT_REVIEW_SPAN_DAYS)));

    for reviewer in state.reviewers.clone() {
        records.push(ReviewRecord::new(
            state.document.clone(),
            state.revision,
            reviewer,
            ReviewRole::Reviewer,
        ));
    }
    records.push(ReviewRecord::new(
        state.document.clone(),
        state.revision,
        leader,
        ReviewRole::Leader,
    ));
    if let Some(approver) = state.approver.clone() {
        records.push(ReviewRecord::new(
            state.document.clone(),
            state.revision,
            approver,
            ReviewRole::Approver,
        ));
    }

    if state.reviewers.is_empty() {
        state.reviewers_step_closed = Some(at_date);
    }

    Ok(())
}

/// Close the reviewers step: force-close every reviewer record without a
/// submission and stamp the close date. No-op if the step already closed.
pub fn end_reviewers_step(
    state: &mut RevisionReviewState,
    records: &mut [ReviewRecord],
    at_date: NaiveDate,
) {
    if state.reviewers_step_closed.is_some() {
        return;
    }
    close_records(records, ReviewRole::Reviewer);
    state.reviewers_step_closed = Some(at_date);
}

/// Close the leader step, cascading through the reviewers step if it is
/// still open. When the revision has no approver the review ends here.
/// No-op if the step already closed.
pub fn end_leader_step(
    state: &mut RevisionReviewState,
    records: &mut [ReviewRecord],
    at_date: NaiveDate,
) {
    if state.leader_step_closed.is_some() {
        return;
    }
    end_reviewers_step(state, records, at_date);
    close_records(records, ReviewRole::Leader);
    state.leader_step_closed = Some(at_date);

    if state.approver.is_none() {
        state.review_end_date = Some(at_date);
    }
}

/// End the review, cascading through both earlier steps. No-op if already
/// ended.
pub fn end_review(
    state: &mut RevisionReviewState,
    records: &mut [ReviewRecord],
    at_date: NaiveDate,
) {
    if state.review_end_date.is_some() {
        return;
    }
    end_leader_step(state, records, at_date);
    close_records(records, ReviewRole::Approver);
    state.review_end_date = Some(at_date);
}

/// Cancel the review: delete every record and reset the workflow dates.
/// The state returns to "never started"; always succeeds.
pub fn cancel_review(state: &mut RevisionReviewState, records: &mut Vec<ReviewRecord>) {
    records.clear();
    state.review_start_date = None;
    state.review_due_date = None;
    state.review_end_date = None;
    state.reviewers_step_closed = None;
    state.leader_step_closed = None;
}

/// Send the review back to the leader for rework. Only valid between the
/// leader step closing and the review ending; reopens the leader record
/// without erasing a prior submission.
pub fn send_back_to_leader_step(
    state: &mut RevisionReviewState,
    records: &mut [ReviewRecord],
) -> Result<(), InvalidTransition> {
    if let Some(ended) = state.review_end_date {
        return Err(InvalidTransition::AlreadyEnded(ended));
    }
    if state.leader_step_closed.is_none() {
        return Err(InvalidTransition::LeaderStepOpen);
    }

    state.leader_step_closed = None;
    if let Some(record) = records
        .iter_mut()
        .find(|r| r.role == ReviewRole::Leader)
    {
        record.closed = false;
        record.reopened = true;
    }
    Ok(())
}

/// Record one participant's explicit submission. Rejected when the record
/// was already submitted or its stage is not the revision's current step.
pub fn post_review(
    state: &RevisionReviewState,
    record: &mut ReviewRecord,
    comments: Option<AttachmentRef>,
    at_date: NaiveDate,
) -> Result<(), InvalidTransition> {
    if let Some(reviewed_on) = record.reviewed_on {
        return Err(InvalidTransition::AlreadySubmitted(reviewed_on));
    }
    let step = state.current_review_step();
    if !record.is_active_at(step) {
        return Err(InvalidTransition::StageNotActive {
            role: record.role,
            step,
        });
    }

    record.reviewed_on = Some(at_date);
    record.comments = comments;
    record.reopened = false;
    Ok(())
}

fn close_records(records: &mut [ReviewRecord], role: ReviewRole) {
    for record in records.iter_mut().filter(|r| r.role == role) {
        if record.reviewed_on.is_none() {
            record.closed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::record::ReviewStatus;
    use crate::review::step::ReviewStep;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2019, 6, 17)
    }

    /// leader + approver + one reviewer, mirroring a fully staffed revision.
    fn reviewable() -> RevisionReviewState {
        RevisionReviewState::new("DOC-001", 1)
            .with_leader("lucie")
            .with_approver("paul")
            .with_reviewer("alice")
    }

    fn leader_only() -> RevisionReviewState {
        RevisionReviewState::new("DOC-002", 1).with_leader("lucie")
    }

    fn started(state: &mut RevisionReviewState) -> Vec<ReviewRecord> {
        let mut records = Vec::new();
        start_review(state, &mut records, today(), None).unwrap();
        records
    }

    fn find<'a>(records: &'a [ReviewRecord], role: ReviewRole) -> &'a ReviewRecord {
        records.iter().find(|r| r.role == role).unwrap()
    }

    fn status_of(
        state: &RevisionReviewState,
        records: &[ReviewRecord],
        role: ReviewRole,
    ) -> ReviewStatus {
        find(records, role).status(state.current_review_step())
    }

    #[test]
    fn test_doc_without_leader_cannot_be_reviewed() {
        let state = RevisionReviewState::new("DOC-001", 1)
            .with_approver("paul")
            .with_reviewer("alice");
        assert!(!can_be_reviewed(&state));

        let mut state = state;
        let mut records = Vec::new();
        assert_eq!(
            start_review(&mut state, &mut records, today(), None),
            Err(InvalidTransition::NoLeader)
        );
    }

    #[test]
    fn test_doc_with_leader_can_be_reviewed() {
        assert!(can_be_reviewed(&leader_only()));
    }

    #[test]
    fn test_doc_can_only_be_reviewed_once() {
        let mut state = reviewable();
        let mut records = started(&mut state);
        assert!(!can_be_reviewed(&state));

        assert_eq!(
            start_review(&mut state, &mut records, today(), None),
            Err(InvalidTransition::AlreadyStarted(today()))
        );
    }

    #[test]
    fn test_start_review_stamps_dates() {
        let mut state = reviewable();
        assert!(state.review_start_date.is_none());
        assert!(state.review_due_date.is_none());

        started(&mut state);

        assert_eq!(state.review_start_date, Some(today()));
        assert_eq!(state.review_due_date, Some(today() + Duration::days(13)));
    }

    #[test]
    fn test_start_review_with_custom_due_date() {
        let mut state = reviewable();
        let at = date(2019, 7, 1);
        let due = date(2019, 7, 3);

        let mut records = Vec::new();
        start_review(&mut state, &mut records, at, Some(due)).unwrap();

        assert_eq!(state.review_start_date, Some(at));
        assert_eq!(state.review_due_date, Some(due));
    }

    #[test]
    fn test_start_review_creates_one_record_per_participant() {
        let mut state = reviewable();
        state.add_reviewer("bob".into());
        state.add_reviewer("carol".into());

        let records = started(&mut state);

        // 3 reviewers + leader + approver
        assert_eq!(records.len(), 5);
        assert_eq!(
            records
                .iter()
                .filter(|r| r.role == ReviewRole::Reviewer)
                .count(),
            3
        );
        assert_eq!(state.current_review_step(), ReviewStep::Reviewer);
    }

    #[test]
    fn test_new_record_statuses() {
        let mut state = reviewable();
        let records = started(&mut state);

        assert_eq!(
            status_of(&state, &records, ReviewRole::Reviewer),
            ReviewStatus::InProgress
        );
        assert_eq!(
            status_of(&state, &records, ReviewRole::Leader),
            ReviewStatus::Pending
        );
        assert_eq!(
            status_of(&state, &records, ReviewRole::Approver),
            ReviewStatus::Pending
        );
    }

    #[test]
    fn test_start_leader_only_review_skips_reviewers_step() {
        let mut state = leader_only();
        let records = started(&mut state);

        assert_eq!(state.reviewers_step_closed, Some(today()));
        assert!(state.leader_step_closed.is_none());
        assert_eq!(records.len(), 1);
        assert_eq!(state.current_review_step(), ReviewStep::Leader);
        assert_eq!(
            status_of(&state, &records, ReviewRole::Leader),
            ReviewStatus::InProgress
        );
    }

    #[test]
    fn test_cancel_review_resets_everything() {
        let mut state = reviewable();
        let mut records = started(&mut state);
        assert!(!records.is_empty());

        cancel_review(&mut state, &mut records);

        assert!(records.is_empty());
        assert!(state.review_start_date.is_none());
        assert!(state.review_due_date.is_none());
        assert!(state.review_end_date.is_none());
        assert!(state.reviewers_step_closed.is_none());
        assert!(state.leader_step_closed.is_none());
        assert_eq!(state.current_review_step(), ReviewStep::Pending);

        // The whole cycle can start over
        assert!(can_be_reviewed(&state));
    }

    #[test]
    fn test_end_reviewers_step_closes_silent_reviewers() {
        let mut state = reviewable();
        let mut records = started(&mut state);

        end_reviewers_step(&mut state, &mut records, today());

        assert_eq!(state.reviewers_step_closed, Some(today()));
        assert_eq!(
            status_of(&state, &records, ReviewRole::Reviewer),
            ReviewStatus::NotReviewed
        );
        assert_eq!(
            status_of(&state, &records, ReviewRole::Leader),
            ReviewStatus::InProgress
        );
        assert_eq!(
            status_of(&state, &records, ReviewRole::Approver),
            ReviewStatus::Pending
        );
    }

    #[test]
    fn test_end_reviewers_step_is_idempotent() {
        let mut state = reviewable();
        let mut records = started(&mut state);

        end_reviewers_step(&mut state, &mut records, today());
        end_reviewers_step(&mut state, &mut records, date(2019, 6, 20));

        assert_eq!(state.reviewers_step_closed, Some(today()));
    }

    #[test]
    fn test_end_reviewers_step_keeps_submissions() {
        let mut state = reviewable();
        let mut records = started(&mut state);

        let idx = records
            .iter()
            .position(|r| r.role == ReviewRole::Reviewer)
            .unwrap();
        post_review(&state, &mut records[idx], None, today()).unwrap();

        end_reviewers_step(&mut state, &mut records, today());

        assert_eq!(
            status_of(&state, &records, ReviewRole::Reviewer),
            ReviewStatus::Reviewed
        );
        assert_eq!(
            status_of(&state, &records, ReviewRole::Leader),
            ReviewStatus::InProgress
        );
    }

    #[test]
    fn test_end_reviewers_step_with_mixed_submissions() {
        let mut state = reviewable();
        state.add_reviewer("bob".into());
        let mut records = started(&mut state);

        let alice = records
            .iter()
            .position(|r| r.role == ReviewRole::Reviewer && r.participant == "alice".into())
            .unwrap();
        post_review(&state, &mut records[alice], None, today()).unwrap();

        end_reviewers_step(&mut state, &mut records, today());

        let step = state.current_review_step();
        assert_eq!(records[alice].status(step), ReviewStatus::Reviewed);

        let bob = records
            .iter()
            .find(|r| r.participant == "bob".into())
            .unwrap();
        assert_eq!(bob.status(step), ReviewStatus::NotReviewed);
    }

    #[test]
    fn test_end_leader_step_cascades_through_reviewers_step() {
        let mut state = reviewable();
        let mut records = started(&mut state);

        end_leader_step(&mut state, &mut records, today());

        assert_eq!(state.reviewers_step_closed, Some(today()));
        assert_eq!(state.leader_step_closed, Some(today()));
        assert_eq!(
            status_of(&state, &records, ReviewRole::Reviewer),
            ReviewStatus::NotReviewed
        );
        assert_eq!(
            status_of(&state, &records, ReviewRole::Leader),
            ReviewStatus::NotReviewed
        );
        assert_eq!(
            status_of(&state, &records, ReviewRole::Approver),
            ReviewStatus::InProgress
        );
    }

    #[test]
    fn test_end_leader_step_with_leader_submission() {
        let mut state = reviewable();
        let mut records = started(&mut state);
        end_reviewers_step(&mut state, &mut records, today());

        let idx = records
            .iter()
            .position(|r| r.role == ReviewRole::Leader)
            .unwrap();
        post_review(&state, &mut records[idx], None, today()).unwrap();
        assert_eq!(
            status_of(&state, &records, ReviewRole::Leader),
            ReviewStatus::Reviewed
        );

        end_leader_step(&mut state, &mut records, today());

        assert_eq!(
            status_of(&state, &records, ReviewRole::Leader),
            ReviewStatus::Reviewed
        );
        assert_eq!(
            status_of(&state, &records, ReviewRole::Approver),
            ReviewStatus::InProgress
        );
    }

    #[test]
    fn test_end_leader_step_with_no_approver_ends_review() {
        let mut state = leader_only();
        let mut records = started(&mut state);

        end_leader_step(&mut state, &mut records, today());

        assert_eq!(state.leader_step_closed, Some(today()));
        assert_eq!(state.review_end_date, Some(today()));
        assert_eq!(state.current_review_step(), ReviewStep::Closed);
    }

    #[test]
    fn test_send_back_to_leader_step() {
        let mut state = reviewable();
        let mut records = started(&mut state);
        end_leader_step(&mut state, &mut records, today());

        send_back_to_leader_step(&mut state, &mut records).unwrap();

        assert!(state.leader_step_closed.is_none());
        let leader = find(&records, ReviewRole::Leader);
        assert!(!leader.closed);
        assert_eq!(
            status_of(&state, &records, ReviewRole::Leader),
            ReviewStatus::InProgress
        );
    }

    #[test]
    fn test_send_back_requires_closed_leader_step() {
        let mut state = reviewable();
        let mut records = started(&mut state);

        assert_eq!(
            send_back_to_leader_step(&mut state, &mut records),
            Err(InvalidTransition::LeaderStepOpen)
        );
    }

    #[test]
    fn test_send_back_rejected_on_ended_review() {
        let mut state = reviewable();
        let mut records = started(&mut state);
        end_review(&mut state, &mut records, today());

        assert_eq!(
            send_back_to_leader_step(&mut state, &mut records),
            Err(InvalidTransition::AlreadyEnded(today()))
        );
    }

    #[test]
    fn test_end_review_cascades_through_all_steps() {
        let mut state = reviewable();
        let mut records = started(&mut state);

        end_review(&mut state, &mut records, today());

        assert_eq!(state.reviewers_step_closed, Some(today()));
        assert_eq!(state.leader_step_closed, Some(today()));
        assert_eq!(state.review_end_date, Some(today()));

        for role in [ReviewRole::Reviewer, ReviewRole::Leader, ReviewRole::Approver] {
            assert_eq!(status_of(&state, &records, role), ReviewStatus::NotReviewed);
        }
    }

    #[test]
    fn test_is_under_review_over_the_whole_cycle() {
        let mut state = reviewable();
        assert!(!state.is_under_review());

        let mut records = started(&mut state);
        assert!(state.is_under_review());

        end_review(&mut state, &mut records, today());
        assert!(!state.is_under_review());
    }

    #[test]
    fn test_current_step_walkthrough() {
        let mut state = reviewable();
        assert_eq!(state.current_review_step(), ReviewStep::Pending);

        let mut records = started(&mut state);
        assert_eq!(state.current_review_step(), ReviewStep::Reviewer);

        end_reviewers_step(&mut state, &mut records, today());
        assert_eq!(state.current_review_step(), ReviewStep::Leader);

        end_leader_step(&mut state, &mut records, today());
        assert_eq!(state.current_review_step(), ReviewStep::Approver);

        end_review(&mut state, &mut records, today());
        assert_eq!(state.current_review_step(), ReviewStep::Closed);
    }

    #[test]
    fn test_post_review_rejects_double_submission() {
        let mut state = reviewable();
        let mut records = started(&mut state);
        let idx = records
            .iter()
            .position(|r| r.role == ReviewRole::Reviewer)
            .unwrap();

        post_review(&state, &mut records[idx], None, today()).unwrap();
        assert_eq!(
            post_review(&state, &mut records[idx], None, today()),
            Err(InvalidTransition::AlreadySubmitted(today()))
        );
    }

    #[test]
    fn test_post_review_rejects_inactive_stage() {
        let mut state = reviewable();
        let mut records = started(&mut state);
        let idx = records
            .iter()
            .position(|r| r.role == ReviewRole::Leader)
            .unwrap();

        // Reviewers step is still open: the leader cannot post yet
        assert_eq!(
            post_review(&state, &mut records[idx], None, today()),
            Err(InvalidTransition::StageNotActive {
                role: ReviewRole::Leader,
                step: ReviewStep::Reviewer,
            })
        );
    }

    #[test]
    fn test_post_review_stores_comments() {
        let mut state = reviewable();
        let mut records = started(&mut state);
        let idx = records
            .iter()
            .position(|r| r.role == ReviewRole::Reviewer)
            .unwrap();

        post_review(
            &state,
            &mut records[idx],
            Some(AttachmentRef::new("uploads/alice-comments.pdf")),
            today(),
        )
        .unwrap();

        assert_eq!(records[idx].reviewed_on, Some(today()));
        assert_eq!(
            records[idx].comments,
            Some(AttachmentRef::new("uploads/alice-comments.pdf"))
        );
    }

    #[test]
    fn test_stage_close_ordering_invariants_hold_everywhere() {
        // leader_step_closed implies reviewers_step_closed,
        // review_end_date implies leader_step_closed
        let check = |state: &RevisionReviewState| {
            if state.leader_step_closed.is_some() {
                assert!(state.reviewers_step_closed.is_some());
            }
            if state.review_end_date.is_some() {
                assert!(state.leader_step_closed.is_some());
            }
        };

        let mut state = reviewable();
        let mut records = started(&mut state);
        check(&state);
        end_reviewers_step(&mut state, &mut records, today());
        check(&state);
        end_leader_step(&mut state, &mut records, today());
        check(&state);
        end_review(&mut state, &mut records, today());
        check(&state);

        let mut state = leader_only();
        let mut records = started(&mut state);
        check(&state);
        end_leader_step(&mut state, &mut records, today());
        check(&state);
    }
}
