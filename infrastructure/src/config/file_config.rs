//! Configuration file schema.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration, merged from defaults and TOML files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub review: ReviewSection,
    pub batch: BatchSection,
    pub sinks: SinkSection,
}

/// Review workflow tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSection {
    /// Days between a review's start and its default due date.
    pub span_days: i64,
}

impl Default for ReviewSection {
    fn default() -> Self {
        Self {
            span_days: docflow_domain::transitions::DEFAULT_REVIEW_SPAN_DAYS,
        }
    }
}

/// Batch execution tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSection {
    /// Extra items in the start batch's progress denominator, keeping the
    /// bar short of 100% until the final summary lands.
    pub progress_padding: usize,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            progress_padding: docflow_application::DEFAULT_PROGRESS_PADDING,
        }
    }
}

/// Where the JSONL sinks write, when configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkSection {
    /// Batch reports land here; unset means log-only notifications.
    pub notifications_path: Option<PathBuf>,
    /// Revision snapshots land here; unset disables indexing.
    pub index_path: Option<PathBuf>,
}
