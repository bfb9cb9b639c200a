use async_trait::async_trait;
use crate::domain::{error::ImportError, models::ImportLogEntry};

#[async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch_file(&self, location: &str) -> Result<String, ImportError>;
}

/// Batch-insert collaborator that receives accepted records.
#[async_trait]
pub trait DataRepository: Send + Sync {
    async fn insert_documents(&self, target_table: &str, documents: &[serde_json::Value]) -> Result<(), ImportError>;
}

/// Append-only import history.
#[async_trait]
pub trait ImportLogRepository: Send + Sync {
    async fn append(&self, entry: ImportLogEntry) -> Result<(), ImportError>;

    /// Most recent entries first.
    async fn recent(&self, limit: usize) -> Result<Vec<ImportLogEntry>, ImportError>;
}
