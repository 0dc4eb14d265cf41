//! Presentation layer for docflow
//!
//! CLI argument definitions, progress bars and console formatting of batch
//! outcomes.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{BatchProgressReporter, SimpleProgress};
