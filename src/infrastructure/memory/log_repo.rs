use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;
use crate::domain::{error::ImportError, models::ImportLogEntry, ports::ImportLogRepository};

/// Import history capped at `capacity` entries; the oldest entry is evicted
/// first.
pub struct BoundedImportLog {
    capacity: usize,
    entries: Mutex<VecDeque<ImportLogEntry>>,
}

impl BoundedImportLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[async_trait]
impl ImportLogRepository for BoundedImportLog {
    async fn append(&self, entry: ImportLogEntry) -> Result<(), ImportError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| ImportError::Repository(e.to_string()))?;
        if entries.len() == self.capacity {
            if let Some(evicted) = entries.pop_front() {
                debug!("Evicting import log entry {}", evicted.id);
            }
        }
        entries.push_back(entry);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ImportLogEntry>, ImportError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| ImportError::Repository(e.to_string()))?;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}
