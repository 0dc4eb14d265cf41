//! CLI entrypoint for docflow
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use docflow_application::{
    BatchProgressNotifier, CloseReviewerStepBatchInput, CloseReviewerStepBatchUseCase,
    DocumentStore, IndexSink, NoIndex, NoProgress, NotificationSink, PostReviewInput,
    PostReviewUseCase, StartReviewBatchInput, StartReviewBatchUseCase, StartReviewInput,
    StartReviewUseCase,
};
use docflow_domain::{AttachmentRef, RecordRef, ReviewRole, RevisionRef};
use docflow_infrastructure::{
    ConfigLoader, JsonlIndexSink, JsonlNotificationSink, LogNotificationSink,
    MemoryDocumentStore, SeedFile, SystemClock,
};
use docflow_presentation::{
    BatchProgressReporter, Cli, Command, ConsoleFormatter, OutputFormat, SimpleProgress,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    // === Dependency Injection ===
    // Load the workspace into the in-memory store
    let seed = SeedFile::load(&cli.workspace)
        .with_context(|| format!("loading workspace {}", cli.workspace.display()))?;
    let store = Arc::new(MemoryDocumentStore::new());
    seed.apply(&store);
    info!("Loaded {} documents from the workspace", seed.documents.len());

    let clock = Arc::new(SystemClock);

    let notifications: Arc<dyn NotificationSink> = match &config.sinks.notifications_path {
        Some(path) => Arc::new(
            JsonlNotificationSink::new(path)
                .with_context(|| format!("opening notification sink {}", path.display()))?,
        ),
        None => Arc::new(LogNotificationSink),
    };
    let index: Arc<dyn IndexSink> = match &config.sinks.index_path {
        Some(path) => Arc::new(
            JsonlIndexSink::new(path)
                .with_context(|| format!("opening index sink {}", path.display()))?,
        ),
        None => Arc::new(NoIndex),
    };

    match cli.command {
        Command::Show { document, revision } => {
            let revision = RevisionRef::new(document, revision);
            let state = store.get_revision_state(&revision).await?;
            let records = store.list_records(&revision).await?;
            print_state(&cli.output, &state, &records);
        }

        Command::Start { document, revision } => {
            let revision = RevisionRef::new(document, revision);
            let use_case = StartReviewUseCase::new(store.clone(), clock)
                .with_index_sink(index)
                .with_review_span_days(config.review.span_days);
            let state = use_case
                .execute(StartReviewInput::new(revision.clone()))
                .await?;
            let records = store.list_records(&revision).await?;
            print_state(&cli.output, &state, &records);
        }

        Command::Post {
            document,
            revision,
            participant,
            role,
            comments,
        } => {
            let reference = RecordRef {
                document: document.into(),
                revision: revision.into(),
                participant: participant.into(),
                role: role.into(),
            };
            let revision = RevisionRef {
                document: reference.document.clone(),
                revision: reference.revision,
            };
            let mut input = PostReviewInput::new(reference);
            if let Some(comments) = comments {
                input = input.with_comments(AttachmentRef::new(comments));
            }
            PostReviewUseCase::new(store.clone(), clock)
                .execute(input)
                .await?;
            let state = store.get_revision_state(&revision).await?;
            let records = store.list_records(&revision).await?;
            print_state(&cli.output, &state, &records);
        }

        Command::BatchStart {
            requester,
            documents,
            all,
        } => {
            let targets = resolve_targets(&store, &documents, all)?;
            let use_case = StartReviewBatchUseCase::new(store, clock, index, notifications)
                .with_progress_padding(config.batch.progress_padding)
                .with_review_span_days(config.review.span_days);

            let input = StartReviewBatchInput::new(requester, targets);
            let progress = select_progress(cli.quiet);
            let summary = use_case
                .execute_with_progress(input, progress.as_ref())
                .await;
            print_summary(&cli.output, &summary);
        }

        Command::BatchClose {
            requester,
            documents,
            all,
        } => {
            let records = resolve_targets(&store, &documents, all)?
                .into_iter()
                .map(|target| RecordRef {
                    document: target.document,
                    revision: target.revision,
                    participant: requester.as_str().into(),
                    role: ReviewRole::Reviewer,
                })
                .collect();
            let use_case = CloseReviewerStepBatchUseCase::new(store, clock, notifications);

            let input = CloseReviewerStepBatchInput::new(requester, records);
            let progress = select_progress(cli.quiet);
            let summary = use_case
                .execute_with_progress(input, progress.as_ref())
                .await;
            print_summary(&cli.output, &summary);
        }
    }

    Ok(())
}

/// Resolve CLI document keys against the workspace, or take every revision
/// with `--all`.
fn resolve_targets(
    store: &MemoryDocumentStore,
    documents: &[String],
    all: bool,
) -> Result<Vec<RevisionRef>> {
    let mut revisions = store.revisions();
    revisions.sort_by(|a, b| {
        (a.document.as_str(), a.revision).cmp(&(b.document.as_str(), b.revision))
    });

    if all {
        return Ok(revisions);
    }
    if documents.is_empty() {
        bail!("no documents given; pass document keys or --all");
    }
    documents
        .iter()
        .map(|key| {
            revisions
                .iter()
                .find(|r| r.document.as_str() == key.as_str())
                .cloned()
                .ok_or_else(|| anyhow!("document {} is not in the workspace", key))
        })
        .collect()
}

/// Pick a progress reporter: fancy bars on a terminal, plain lines when
/// piped, nothing with `--quiet`.
fn select_progress(quiet: bool) -> Box<dyn BatchProgressNotifier> {
    if quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(BatchProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    }
}

fn print_state(
    output: &OutputFormat,
    state: &docflow_domain::RevisionReviewState,
    records: &[docflow_domain::ReviewRecord],
) {
    let text = match output {
        OutputFormat::Console => ConsoleFormatter::format_state(state, records),
        OutputFormat::Json => ConsoleFormatter::format_state_json(state, records),
    };
    println!("{}", text);
}

fn print_summary(output: &OutputFormat, summary: &docflow_application::BatchSummary) {
    let text = match output {
        OutputFormat::Console => ConsoleFormatter::format_summary(summary),
        OutputFormat::Json => ConsoleFormatter::format_summary_json(summary),
    };
    println!("{}", text);
}
