//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console output
    Console,
    /// JSON output
    Json,
}

/// CLI arguments for docflow
#[derive(Parser, Debug)]
#[command(name = "docflow")]
#[command(author, version, about = "Document review workflow engine")]
#[command(long_about = r#"
docflow drives document revisions through a three-stage review:
reviewers first, then the leader, then the approver.

Documents are loaded from a TOML workspace file:

  [[documents]]
  key = "FAC-PROC-0042"
  leader = "lucie"
  approver = "paul"
  reviewers = ["alice", "bob"]

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./docflow.toml      Project-level config
3. ~/.config/docflow/config.toml   Global config

Example:
  docflow -w workspace.toml batch-start --requester ops --all
  docflow -w workspace.toml post FAC-PROC-0042 --participant alice --role reviewer
"#)]
pub struct Cli {
    /// Path to the TOML workspace file describing the documents
    #[arg(short, long, value_name = "PATH")]
    pub workspace: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "console")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the review state of one document
    Show {
        /// Document key
        document: String,
        /// Revision number
        #[arg(long, default_value_t = 1)]
        revision: u32,
    },

    /// Start the review of one document revision
    Start {
        /// Document key
        document: String,
        /// Revision number
        #[arg(long, default_value_t = 1)]
        revision: u32,
    },

    /// Post a participant's review
    Post {
        /// Document key
        document: String,
        /// Revision number
        #[arg(long, default_value_t = 1)]
        revision: u32,
        /// Submitting participant
        #[arg(long)]
        participant: String,
        /// Role the participant submits as
        #[arg(long, value_enum)]
        role: RoleArg,
        /// Reference to an uploaded comments attachment
        #[arg(long, value_name = "REF")]
        comments: Option<String>,
    },

    /// Start reviews for many documents at once
    BatchStart {
        /// Who launches the batch (receives the summary)
        #[arg(long)]
        requester: String,
        /// Document keys to start (everything in the workspace with --all)
        documents: Vec<String>,
        /// Start every document in the workspace
        #[arg(long)]
        all: bool,
    },

    /// Close the requester's own pending reviews at once
    BatchClose {
        /// Whose reviewer records to close
        #[arg(long)]
        requester: String,
        /// Document keys to close reviews on (all of them with --all)
        documents: Vec<String>,
        /// Close every pending review of the requester in the workspace
        #[arg(long)]
        all: bool,
    },
}

/// Review role as a CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Reviewer,
    Leader,
    Approver,
}

impl From<RoleArg> for docflow_domain::ReviewRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Reviewer => docflow_domain::ReviewRole::Reviewer,
            RoleArg::Leader => docflow_domain::ReviewRole::Leader,
            RoleArg::Approver => docflow_domain::ReviewRole::Approver,
        }
    }
}
