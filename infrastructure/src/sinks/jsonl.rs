//! JSONL file sinks.
//!
//! Each notification or index entry is serialized as a single JSON line
//! with a `type` field and a UTC `timestamp`, appended via a buffered
//! writer. Downstream delivery (mail, search engine ingestion) tails these
//! files; the workflow itself only ever appends.

use async_trait::async_trait;
use docflow_application::{BatchReport, IndexError, IndexSink, NotificationSink, NotifyError};
use docflow_domain::{DocumentType, Participant, RevisionRef};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only JSONL writer shared by the two sinks.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every line and
/// on `Drop` — the files are tailed by external consumers.
struct JsonlWriter {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlWriter {
    fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    fn append(&self, event_type: &'static str, payload: Value) -> std::io::Result<()> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let record = match payload {
            Value::Object(mut map) => {
                map.insert("type".to_string(), Value::String(event_type.to_string()));
                map.insert("timestamp".to_string(), Value::String(timestamp));
                Value::Object(map)
            }
            other => serde_json::json!({
                "type": event_type,
                "timestamp": timestamp,
                "data": other,
            }),
        };

        let line = serde_json::to_string(&record).map_err(std::io::Error::other)?;
        let mut writer = self.writer.lock().expect("writer lock poisoned");
        writeln!(writer, "{}", line)?;
        writer.flush()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for JsonlWriter {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

/// Notification sink appending one JSON line per batch report.
pub struct JsonlNotificationSink {
    writer: JsonlWriter,
}

impl JsonlNotificationSink {
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            writer: JsonlWriter::open(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.writer.path()
    }
}

#[async_trait]
impl NotificationSink for JsonlNotificationSink {
    async fn notify(
        &self,
        requester: &Participant,
        report: &BatchReport,
    ) -> Result<(), NotifyError> {
        let payload = serde_json::json!({
            "recipient": requester,
            "context": report.context,
            "succeeded": report.succeeded,
            "failed": report.failed,
        });
        self.writer
            .append("batch_report", payload)
            .map_err(|e| NotifyError::Backend(e.to_string()))
    }
}

/// Index sink appending one JSON line per published snapshot.
pub struct JsonlIndexSink {
    writer: JsonlWriter,
}

impl JsonlIndexSink {
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            writer: JsonlWriter::open(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.writer.path()
    }
}

#[async_trait]
impl IndexSink for JsonlIndexSink {
    async fn index(
        &self,
        document_type: &DocumentType,
        revision: &RevisionRef,
        snapshot: Value,
    ) -> Result<(), IndexError> {
        let payload = serde_json::json!({
            "document_type": document_type,
            "document": revision.document,
            "revision": revision.revision,
            "snapshot": snapshot,
        });
        self.writer
            .append("revision_indexed", payload)
            .map_err(|e| IndexError::Backend(e.to_string()))
    }
}
