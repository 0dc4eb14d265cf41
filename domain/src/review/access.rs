//! Access policy predicates.
//!
//! Enforcement is a boundary concern; the workflow only supplies the pure
//! predicates. The policy:
//!
//! - a reviewer may act only while the reviewers stage is open,
//! - the leader may act while their stage is open,
//! - the approver may act at any point the review is active at or past the
//!   leader stage,
//! - anyone else never.

use crate::participant::Participant;
use crate::review::state::RevisionReviewState;

/// Whether `participant` may act on the review in its current state.
pub fn can_access_review(state: &RevisionReviewState, participant: &Participant) -> bool {
    if !state.is_under_review() {
        return false;
    }
    if state.is_approver(participant) {
        return true;
    }
    if state.is_leader(participant) {
        return state.leader_step_closed.is_none();
    }
    if state.is_reviewer(participant) {
        return state.reviewers_step_closed.is_none();
    }
    false
}
