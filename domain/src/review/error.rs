//! Review workflow errors.

use crate::review::record::ReviewRole;
use crate::review::step::ReviewStep;
use chrono::NaiveDate;
use thiserror::Error;

/// A transition's preconditions were violated given the current state.
///
/// This is the only error kind the workflow itself raises; it always means
/// caller misuse and is never retried. Collaborator failures (store, sinks)
/// are separate types owned by the ports that raise them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTransition {
    #[error("review cannot start: no leader is assigned")]
    NoLeader,

    #[error("review cannot start: it already started on {0}")]
    AlreadyStarted(NaiveDate),

    #[error("review was already submitted on {0}")]
    AlreadySubmitted(NaiveDate),

    #[error("the {role} stage is not active (review is at the {step} step)")]
    StageNotActive { role: ReviewRole, step: ReviewStep },

    #[error("the leader step is not closed")]
    LeaderStepOpen,

    #[error("review already ended on {0}")]
    AlreadyEnded(NaiveDate),
}
