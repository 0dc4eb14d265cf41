//! Application layer for docflow
//!
//! This crate contains the use cases driving the review workflow and the
//! port definitions for the external collaborators the workflow consumes
//! (document store, clock, notification and index sinks, progress
//! reporting). It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    clock::{Clock, FixedClock},
    document_store::{DocumentStore, StoreError, UnitOfWork},
    index_sink::{IndexError, IndexSink, NoIndex},
    notification_sink::{BatchContext, BatchReport, NoNotifications, NotificationSink, NotifyError},
    progress::{BatchProgressNotifier, NoProgress},
};
pub use use_cases::batch::{BatchFailure, BatchSummary};
pub use use_cases::cancel_review::{CancelReviewError, CancelReviewInput, CancelReviewUseCase};
pub use use_cases::close_reviewer_step_batch::{
    CloseReviewerStepBatchInput, CloseReviewerStepBatchUseCase,
};
pub use use_cases::close_step::{CloseStepError, CloseStepInput, CloseStepUseCase, CloseTarget};
pub use use_cases::post_review::{PostReviewError, PostReviewInput, PostReviewUseCase};
pub use use_cases::send_back::{SendBackError, SendBackInput, SendBackUseCase};
pub use use_cases::start_review::{StartReviewError, StartReviewInput, StartReviewUseCase};
pub use use_cases::start_review_batch::{
    DEFAULT_PROGRESS_PADDING, StartReviewBatchInput, StartReviewBatchUseCase,
};
