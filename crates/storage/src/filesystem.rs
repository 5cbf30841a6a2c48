//! Filesystem-based storage implementation

mod stored_file;

pub use stored_file::StoredFile;

use crate::{RetentionPolicy, Storage, SweepReport};
use anyhow::{Context, Result};
use async_trait::async_trait;
use common::file_utils::validate_stored_name;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, error, info};

/// Flat directory of stored uploads
pub struct FilesystemStorage {
    data_dir: PathBuf,
}

impl FilesystemStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the storage directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .with_context(|| format!("Failed to create storage directory {:?}", self.data_dir))
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_stored_name(name)
            .map_err(|e| anyhow::anyhow!("Invalid stored name {:?}: {}", name, e))?;
        Ok(self.data_dir.join(name))
    }
}

/// Entry disappeared between listing and stat/delete (e.g. a concurrent pass)
fn vanished(e: &std::io::Error) -> bool {
    e.kind() == ErrorKind::NotFound
}

#[async_trait]
impl Storage for FilesystemStorage {
    async fn exists(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        tokio::fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to check existence of {:?}", path))
    }

    async fn create(&self, name: &str) -> Result<StoredFile> {
        let path = self.path_for(name)?;
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to create {:?}", path))?;
        Ok(StoredFile::new(path, file))
    }

    async fn remove(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if vanished(&e) => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {:?}", path)),
        }
    }

    async fn collect_garbage(
        &self,
        policy: &RetentionPolicy,
        now: SystemTime,
    ) -> Result<SweepReport> {
        let mut entries = tokio::fs::read_dir(&self.data_dir)
            .await
            .with_context(|| format!("Failed to read storage directory {:?}", self.data_dir))?;

        let mut report = SweepReport::default();

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "Failed to read next directory entry, ending pass early");
                    report.failed += 1;
                    break;
                }
            };
            report.scanned += 1;

            let name = entry.file_name().to_string_lossy().into_owned();

            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(e) if vanished(&e) => {
                    debug!(file = %name, "Entry vanished before stat");
                    continue;
                }
                Err(e) => {
                    error!(file = %name, error = %e, "Failed to get file type");
                    report.failed += 1;
                    continue;
                }
            };

            // Directories are never descended into or removed
            if !file_type.is_file() {
                report.skipped += 1;
                continue;
            }

            if policy.is_ignored(&name) {
                debug!(file = %name, "Skipping ignored file");
                report.skipped += 1;
                continue;
            }

            let modified = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) if vanished(&e) => {
                    debug!(file = %name, "Entry vanished before stat");
                    continue;
                }
                Err(e) => {
                    error!(file = %name, error = %e, "Failed to get file info");
                    report.failed += 1;
                    continue;
                }
            };

            if !policy.is_expired(modified, now) {
                report.kept += 1;
                continue;
            }

            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => {
                    info!(file = %name, "Removed old file");
                    report.removed += 1;
                }
                Err(e) if vanished(&e) => {
                    debug!(file = %name, "File already removed");
                }
                Err(e) => {
                    error!(file = %name, error = %e, "Failed to remove file");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}
