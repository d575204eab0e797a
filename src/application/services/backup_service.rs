//! Backup export/import and the periodic auto-backup worker.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::domain::entities::BackupSnapshot;
use crate::domain::repositories::BackupRepository;
use crate::error::AppError;

const BACKUP_PREFIX: &str = "warehouse_backup_";

/// A snapshot ready to be downloaded or written to disk.
#[derive(Debug, Clone)]
pub struct BackupExport {
    pub filename: String,
    pub snapshot: BackupSnapshot,
}

pub fn backup_filename(at: DateTime<Utc>) -> String {
    format!("{}{}.json", BACKUP_PREFIX, at.format("%Y-%m-%d"))
}

pub struct BackupService<B: BackupRepository> {
    repository: Arc<B>,
}

impl<B: BackupRepository> BackupService<B> {
    pub fn new(repository: Arc<B>) -> Self {
        Self { repository }
    }

    /// Snapshot of every collection stamped with the export time.
    pub async fn export(&self) -> Result<BackupExport, AppError> {
        let now = Utc::now();
        let mut snapshot = self.repository.snapshot().await?;
        snapshot.exported_at = Some(now);
        Ok(BackupExport {
            filename: backup_filename(now),
            snapshot,
        })
    }

    /// Restores the sections present in `snapshot`; returns their names.
    ///
    /// # Errors
    ///
    /// [`AppError::Validation`] if the snapshot carries no section or its
    /// settings are invalid.
    pub async fn import(&self, snapshot: BackupSnapshot) -> Result<Vec<&'static str>, AppError> {
        if snapshot.sections().is_empty() {
            return Err(AppError::bad_request(
                "Backup contains no data",
                json!({ "reason": "no known sections" }),
            ));
        }
        if let Some(settings) = &snapshot.settings {
            settings.validate()?;
        }

        let restored = self.repository.restore(snapshot).await?;
        info!(sections = ?restored, "Backup imported");
        Ok(restored)
    }

    /// Wipes all warehouse data. Requires `confirm`.
    pub async fn clear(&self, confirm: bool) -> Result<(), AppError> {
        if !confirm {
            return Err(AppError::bad_request(
                "Clearing all data requires confirmation",
                json!({ "confirm": false }),
            ));
        }
        self.repository.clear().await?;
        warn!("All warehouse data cleared");
        Ok(())
    }

    /// Writes a snapshot into `dir` when auto-backup is on and the newest
    /// backup there is older than the configured frequency.
    ///
    /// Returns the written path, or `None` when nothing was due.
    pub async fn auto_backup(&self, dir: &Path) -> Result<Option<PathBuf>, AppError> {
        let export = self.export().await?;
        let settings = export.snapshot.settings.clone().unwrap_or_default();
        if !settings.auto_backup {
            debug!("Auto-backup disabled");
            return Ok(None);
        }

        tokio::fs::create_dir_all(dir).await.map_err(io_error)?;

        let now = export.snapshot.exported_at.unwrap_or_else(Utc::now);
        if let Some(last) = latest_backup(dir).await?
            && now - last < settings.backup_frequency.as_duration()
        {
            debug!(last = %last, "Backup not due yet");
            return Ok(None);
        }

        let body = serde_json::to_vec_pretty(&export.snapshot)
            .map_err(|e| AppError::internal("Failed to encode backup", json!({ "reason": e.to_string() })))?;

        let path = dir.join(&export.filename);
        let tmp = dir.join(format!(".{}.tmp", export.filename));
        tokio::fs::write(&tmp, body).await.map_err(io_error)?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_error)?;

        metrics::counter!("backups_written_total").increment(1);
        info!(path = %path.display(), "Auto-backup written");
        Ok(Some(path))
    }
}

fn io_error(e: std::io::Error) -> AppError {
    AppError::internal("Backup I/O failed", json!({ "reason": e.to_string() }))
}

/// Modification time of the newest backup file in `dir`.
async fn latest_backup(dir: &Path) -> Result<Option<DateTime<Utc>>, AppError> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_error)?;
    let mut latest: Option<DateTime<Utc>> = None;

    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.starts_with(BACKUP_PREFIX) || !name.ends_with(".json") {
            continue;
        }
        let modified: DateTime<Utc> = entry
            .metadata()
            .await
            .and_then(|m| m.modified())
            .map_err(io_error)?
            .into();
        if latest.is_none_or(|l| modified > l) {
            latest = Some(modified);
        }
    }
    Ok(latest)
}

/// Periodically runs [`BackupService::auto_backup`] until the task is dropped.
pub async fn run_backup_worker<B: BackupRepository>(
    service: Arc<BackupService<B>>,
    dir: PathBuf,
    every: Duration,
) {
    info!(dir = %dir.display(), every_secs = every.as_secs(), "Backup worker started");
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        if let Err(e) = service.auto_backup(&dir).await {
            error!(error = %e, "Auto-backup failed");
        }
    }
}
