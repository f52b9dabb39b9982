//! File-backed history store.

use crate::export::ExportFormat;
use crate::query::HistoryQuery;
use crate::record::{ContentRecord, PostMetrics};
use crate::stats::HistoryStatistics;
use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use tweetloom_error::{ExportError, ExportErrorKind, HistoryError, HistoryErrorKind};

/// Cap used by the general-purpose store.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Bounded, append-only post history kept in one JSON file.
///
/// Every mutation is a read-modify-write of the whole file. Clones share a
/// mutex, so writes from one process never interleave.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    max_entries: usize,
    write_lock: Arc<Mutex<()>>,
}

impl HistoryStore {
    /// Open the store at `path`, creating the parent directory and an empty
    /// log when missing.
    ///
    /// Creation failures are logged; the store stays usable and reads as empty.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), max_entries = max_entries))]
    pub async fn open(path: impl AsRef<Path>, max_entries: usize) -> Self {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            max_entries: max_entries.max(1),
            write_lock: Arc::new(Mutex::new(())),
        };
        if let Err(e) = store.ensure_file().await {
            warn!(error = %e, "Could not create history file");
        }
        store
    }

    async fn ensure_file(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| HistoryError::new(HistoryErrorKind::Write(e.to_string())))?;
        }
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            tokio::fs::write(&self.path, "[]")
                .await
                .map_err(|e| HistoryError::new(HistoryErrorKind::Write(e.to_string())))?;
            info!(path = %self.path.display(), "Created history file");
        }
        Ok(())
    }

    /// Log file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maximum number of records kept.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// All records, oldest first. Missing or unreadable logs are empty.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Vec<ContentRecord> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                debug!(error = %e, "History not readable, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "History is not valid JSON, treating as empty");
                Vec::new()
            }
        }
    }

    async fn write(&self, records: &[ContentRecord]) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| HistoryError::new(HistoryErrorKind::Serialize(e.to_string())))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| HistoryError::new(HistoryErrorKind::Write(e.to_string())))?;
        debug!(count = records.len(), "History saved");
        Ok(())
    }

    /// Replace the whole log with `records`, keeping only the newest
    /// `max_entries`.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn save(&self, mut records: Vec<ContentRecord>) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        self.cap(&mut records);
        self.write(&records).await
    }

    fn cap(&self, records: &mut Vec<ContentRecord>) {
        let excess = records.len().saturating_sub(self.max_entries);
        if excess > 0 {
            records.drain(..excess);
            debug!(evicted = excess, "Evicted oldest history records");
        }
    }

    /// Append one record, evicting the oldest entries past the cap.
    #[instrument(skip(self, record), fields(post_id = %record.id(), category = %record.category()))]
    pub async fn append(&self, record: ContentRecord) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await;
        records.push(record);
        self.cap(&mut records);
        self.write(&records).await?;
        info!("Recorded post in history");
        Ok(())
    }

    /// The `limit` most recent records, oldest first.
    pub async fn recent(&self, limit: usize) -> Vec<ContentRecord> {
        HistoryQuery::new().with_limit(limit).apply(self.load().await)
    }

    /// First record with the given id.
    pub async fn get(&self, id: &str) -> Option<ContentRecord> {
        self.load().await.into_iter().find(|r| r.id() == id)
    }

    /// Records matching `query`, oldest first.
    pub async fn query(&self, query: &HistoryQuery) -> Vec<ContentRecord> {
        query.apply(self.load().await)
    }

    /// Aggregate statistics over the full log.
    pub async fn statistics(&self) -> HistoryStatistics {
        HistoryStatistics::from_records(&self.load().await)
    }

    /// Drop records older than `days` days. Records with unparseable
    /// timestamps are kept. Returns the number removed.
    #[instrument(skip(self))]
    pub async fn cleanup_older_than(&self, days: u32) -> Result<usize, HistoryError> {
        let _guard = self.write_lock.lock().await;
        // Ages beyond the representable range remove nothing.
        let cutoff = Duration::try_days(i64::from(days))
            .and_then(|age| Utc::now().checked_sub_signed(age))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let records = self.load().await;
        let before = records.len();
        let kept: Vec<ContentRecord> = records
            .into_iter()
            .filter(|r| r.created_at().is_none_or(|created| created >= cutoff))
            .collect();
        let removed = before - kept.len();

        self.write(&kept).await?;
        if removed > 0 {
            info!(removed, days, "Cleaned up old history records");
        }
        Ok(removed)
    }

    /// Store fresh engagement counters for a post. Returns `false` when no
    /// record has that id.
    #[instrument(skip(self, metrics), fields(post_id = id))]
    pub async fn update_metrics(&self, id: &str, metrics: PostMetrics) -> Result<bool, HistoryError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await;

        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            debug!("No history record for post");
            return Ok(false);
        };
        record.set_metrics(metrics);

        self.write(&records).await?;
        Ok(true)
    }

    /// Default export location: next to the log, stamped with the local time.
    pub fn default_export_path(&self, format: ExportFormat) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let name = format!("history_export_{}.{}", stamp, format.extension());
        match self.path.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Write the full log to `path` in `format`, or to
    /// [`default_export_path`](Self::default_export_path) when `path` is `None`.
    ///
    /// Returns the path written.
    #[instrument(skip(self, path), fields(format = %format))]
    pub async fn export(
        &self,
        format: ExportFormat,
        path: Option<&Path>,
    ) -> Result<PathBuf, ExportError> {
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => self.default_export_path(format),
        };
        let records = self.load().await;
        let bytes = format.encode(&records)?;

        let write_error = |e: std::io::Error| {
            ExportError::new(ExportErrorKind::Write {
                path: target.display().to_string(),
                message: e.to_string(),
            })
        };
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        tokio::fs::write(&target, bytes).await.map_err(|e| {
            error!(error = %e, path = %target.display(), "Failed to export history");
            write_error(e)
        })?;

        info!(path = %target.display(), count = records.len(), "History exported");
        Ok(target)
    }
}
