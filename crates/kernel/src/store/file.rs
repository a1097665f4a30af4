//! JSON file settings backend.
//!
//! The record is written to a sibling temp file and renamed into place, so
//! readers see either the old or the new record, never a partial one.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::SettingsRecord;
use super::backend::{SettingsBackend, WriteOutcome};

/// Settings backend storing the record as a JSON file.
pub struct FileBackend {
    path: PathBuf,
    /// Serializes read-compare-write within this process.
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Create a backend for `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_record(&self) -> Result<Option<SettingsRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read settings file {}", self.path.display())
                });
            }
        };

        let record = serde_json::from_slice(&bytes).with_context(|| {
            format!("failed to parse settings file {}", self.path.display())
        })?;
        Ok(Some(record))
    }
}

#[async_trait]
impl SettingsBackend for FileBackend {
    async fn read(&self) -> Result<Option<SettingsRecord>> {
        self.read_record().await
    }

    async fn write(&self, record: &SettingsRecord, expected: u64) -> Result<WriteOutcome> {
        let _guard = self.write_lock.lock().await;

        let current = self.read_record().await?.map_or(0, |r| r.revision);
        if current != expected {
            return Ok(WriteOutcome::Conflict { current });
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_vec_pretty(record).context("serialize settings")?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, &json)
            .await
            .with_context(|| format!("failed to write {}", temp.display()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), revision = record.revision, "settings file written");
        Ok(WriteOutcome::Written)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
