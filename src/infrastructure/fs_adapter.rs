use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, error, info};
use crate::domain::{error::ImportError, ports::FileFetcher};

/// Reads import files from the local filesystem, relative to `base_dir`
/// unless the location is absolute.
pub struct LocalFileFetcher {
    base_dir: Option<PathBuf>,
}

impl LocalFileFetcher {
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(location),
            None => PathBuf::from(location),
        }
    }
}

impl Default for LocalFileFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileFetcher for LocalFileFetcher {
    async fn fetch_file(&self, location: &str) -> Result<String, ImportError> {
        let path = self.resolve(location);
        debug!("Reading file: {}", path.display());

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            error!("Failed to read {}: {}", path.display(), e);
            ImportError::Io(format!("{}: {}", path.display(), e))
        })?;

        let text = String::from_utf8(bytes).map_err(|e| {
            error!("File {} is not UTF-8 at byte {}", path.display(), e.utf8_error().valid_up_to());
            ImportError::Encoding(format!("{}: {}", path.display(), e))
        })?;

        info!("Read {} bytes from {}", text.len(), path.display());
        Ok(text)
    }
}
