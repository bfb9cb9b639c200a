use async_trait::async_trait;
use std::sync::Mutex;
use tracing::debug;
use crate::domain::{error::ImportError, ports::DataRepository};

/// Keeps every insert call in memory, in call order.
#[derive(Default)]
pub struct InMemoryDataRepository {
    batches: Mutex<Vec<(String, Vec<serde_json::Value>)>>,
}

impl InMemoryDataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every insert call as `(table, documents)`.
    pub fn batches(&self) -> Vec<(String, Vec<serde_json::Value>)> {
        self.batches.lock().map(|b| b.clone()).unwrap_or_default()
    }

    /// All documents stored in `table`, in insertion order.
    pub fn documents(&self, table: &str) -> Vec<serde_json::Value> {
        self.batches()
            .into_iter()
            .filter(|(t, _)| t == table)
            .flat_map(|(_, docs)| docs)
            .collect()
    }
}

#[async_trait]
impl DataRepository for InMemoryDataRepository {
    async fn insert_documents(&self, target_table: &str, documents: &[serde_json::Value]) -> Result<(), ImportError> {
        debug!("Storing {} documents in memory for {}", documents.len(), target_table);
        let mut batches = self
            .batches
            .lock()
            .map_err(|e| ImportError::Repository(e.to_string()))?;
        batches.push((target_table.to_string(), documents.to_vec()));
        Ok(())
    }
}
