//! Settings persistence backends.
//!
//! The definition store reads and writes its whole record through
//! [`SettingsBackend`]. Writes are compare-and-swap on the record revision
//! so a writer holding a stale copy cannot overwrite newer settings.

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;

use super::SettingsRecord;

/// Outcome of a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record was persisted.
    Written,

    /// The persisted revision no longer matched; nothing was written.
    Conflict { current: u64 },
}

/// Storage for the single settings record.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Read the persisted record. Returns `None` when nothing was saved yet.
    async fn read(&self) -> Result<Option<SettingsRecord>>;

    /// Persist `record` if the stored revision still equals `expected`.
    ///
    /// A missing record counts as revision 0.
    async fn write(&self, record: &SettingsRecord, expected: u64) -> Result<WriteOutcome>;

    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;
}

/// In-process backend. Used by tests and `SETTINGS_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryBackend {
    record: Mutex<Option<SettingsRecord>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that already holds `record`.
    pub fn with_record(record: SettingsRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

#[async_trait]
impl SettingsBackend for MemoryBackend {
    async fn read(&self) -> Result<Option<SettingsRecord>> {
        Ok(self.record.lock().clone())
    }

    async fn write(&self, record: &SettingsRecord, expected: u64) -> Result<WriteOutcome> {
        let mut guard = self.record.lock();
        let current = guard.as_ref().map_or(0, |r| r.revision);
        if current != expected {
            return Ok(WriteOutcome::Conflict { current });
        }
        *guard = Some(record.clone());
        Ok(WriteOutcome::Written)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
