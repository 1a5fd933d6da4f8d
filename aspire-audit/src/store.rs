//! Audit store implementations

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;
use tracing::info;

use aspire_interfaces::{AuditStore, StoreError};
use aspire_types::AuditEvent;

/// Emits audit events as structured log lines under `target: "audit"`.
///
/// Deployments route that target to their aggregator; the event itself is the
/// JSON payload of the line.
#[derive(Debug, Clone, Default)]
pub struct TracingAuditStore;

impl TracingAuditStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditStore for TracingAuditStore {
    async fn append(&self, event: &AuditEvent) -> Result<(), StoreError> {
        let json = serde_json::to_string(event)
            .map_err(|e| StoreError::internal(format!("failed to serialize audit event: {}", e)))?;

        info!(target: "audit", "{}", json);
        Ok(())
    }
}

/// Appends audit events to daily-rotated JSONL files.
pub struct FileAuditStore {
    base_path: PathBuf,
    // Current file path and its writer; replaced on day rollover.
    writer: Mutex<Option<(PathBuf, BufWriter<File>)>>,
}

impl FileAuditStore {
    /// Create a file store rooted at the given directory.
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_path = base_path.into();

        tokio::fs::create_dir_all(&base_path)
            .await
            .map_err(|e| StoreError::connection(format!("failed to create audit log directory: {}", e)))?;

        Ok(Self {
            base_path,
            writer: Mutex::new(None),
        })
    }

    fn todays_file(&self) -> PathBuf {
        let date = Utc::now().format("%Y-%m-%d");
        self.base_path.join(format!("audit-{}.jsonl", date))
    }

    async fn open_writer(path: &Path) -> Result<BufWriter<File>, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| StoreError::connection(format!("failed to open audit log file: {}", e)))?;

        Ok(BufWriter::new(file))
    }
}

#[async_trait]
impl AuditStore for FileAuditStore {
    async fn append(&self, event: &AuditEvent) -> Result<(), StoreError> {
        let json = serde_json::to_string(event)
            .map_err(|e| StoreError::internal(format!("failed to serialize audit event: {}", e)))?;

        let today = self.todays_file();
        let mut guard = self.writer.lock().await;

        // Daily rotation: swap the writer when the date rolls over.
        let needs_rotation = match guard.as_ref() {
            Some((path, _)) => *path != today,
            None => true,
        };
        if needs_rotation {
            if let Some((_, mut old_writer)) = guard.take() {
                old_writer.flush().await.ok();
            }
            let writer = Self::open_writer(&today).await?;
            *guard = Some((today, writer));
        }

        let Some((_, writer)) = guard.as_mut() else {
            return Err(StoreError::internal("audit log writer unavailable"));
        };
        writer
            .write_all(json.as_bytes())
            .await
            .map_err(|e| StoreError::internal(format!("failed to write audit log entry: {}", e)))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| StoreError::internal(format!("failed to write audit log entry: {}", e)))?;
        writer
            .flush()
            .await
            .map_err(|e| StoreError::internal(format!("failed to flush audit log writer: {}", e)))?;

        Ok(())
    }
}
