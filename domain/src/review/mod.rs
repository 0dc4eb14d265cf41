//! Review workflow domain
//!
//! A document revision is reviewed in three sequential stages:
//!
//! ```text
//! pending ──start_review──> reviewer ──> leader ──> approver ──> closed
//!                               │           │ ^         │
//!                               └──cascade──┘ └─rework──┘
//! ```
//!
//! - [`RevisionReviewState`] holds the per-revision workflow state: start,
//!   due and end dates, the two stage-close dates, and the participants.
//! - [`ReviewRecord`] tracks one participant's outcome within one stage.
//! - [`transitions`] contains the stateless transition functions that are
//!   the only way the state and its records are mutated.
//! - [`access`] holds the pure predicates the boundary uses to apply the
//!   access policy (who may act at which step).
//!
//! Closing a later stage force-closes any earlier stage still open; the
//! cascades are composed from the smaller idempotent transitions so closing
//! semantics live in exactly one place.

pub mod access;
pub mod error;
pub mod record;
pub mod state;
pub mod step;
pub mod transitions;

// Re-export main types
pub use error::InvalidTransition;
pub use record::{AttachmentRef, RecordRef, ReviewRecord, ReviewRole, ReviewStatus};
pub use state::RevisionReviewState;
pub use step::ReviewStep;
