use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};
use crate::domain::{error::ImportError, ports::DataRepository};

/// Appends documents as JSON lines to `{output_dir}/{table}.jsonl`.
pub struct JsonLinesDataRepository {
    output_dir: PathBuf,
}

impl JsonLinesDataRepository {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        debug!("Initializing JSON lines repository in: {}", output_dir.display());
        Self { output_dir }
    }

    pub fn table_path(&self, target_table: &str) -> PathBuf {
        self.output_dir.join(format!("{}.jsonl", target_table))
    }
}

#[async_trait]
impl DataRepository for JsonLinesDataRepository {
    async fn insert_documents(&self, target_table: &str, documents: &[serde_json::Value]) -> Result<(), ImportError> {
        debug!("Inserting {} documents into table: {}", documents.len(), target_table);

        if documents.is_empty() {
            info!("No documents to insert into {}", target_table);
            return Ok(());
        }

        let mut buffer = Vec::new();
        for (i, doc) in documents.iter().enumerate() {
            serde_json::to_writer(&mut buffer, doc).map_err(|e| {
                error!("Failed to serialize document {}: {}", i, e);
                ImportError::Repository(e.to_string())
            })?;
            buffer.push(b'\n');
        }

        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            error!("Failed to create {}: {}", self.output_dir.display(), e);
            ImportError::Repository(e.to_string())
        })?;

        let path = self.table_path(target_table);
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| {
                error!("Failed to open {}: {}", path.display(), e);
                ImportError::Repository(e.to_string())
            })?;
        file.write_all(&buffer).await.map_err(|e| {
            error!("Failed to write documents to {}: {}", path.display(), e);
            ImportError::Repository(e.to_string())
        })?;
        file.flush().await.map_err(|e| ImportError::Repository(e.to_string()))?;

        info!("✅ Appended {} documents to {}", documents.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn appends_one_line_per_document() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonLinesDataRepository::new(dir.path().join("out"));

        repo.insert_documents("products", &[json!({"product_id": "P1"}), json!({"product_id": "P2"})])
            .await
            .unwrap();
        repo.insert_documents("products", &[json!({"product_id": "P3"})])
            .await
            .unwrap();
        repo.insert_documents("products", &[]).await.unwrap();

        let content = std::fs::read_to_string(repo.table_path("products")).unwrap();
        let ids: Vec<String> = content
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap()["product_id"].to_string())
            .collect();
        assert_eq!(ids, vec!["\"P1\"", "\"P2\"", "\"P3\""]);
    }
}
