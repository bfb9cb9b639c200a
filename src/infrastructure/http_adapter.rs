use async_trait::async_trait;
use tracing::{debug, error, info};
use crate::domain::{error::ImportError, ports::FileFetcher};

/// Downloads import files over http(s).
pub struct HttpFileFetcher {
    client: reqwest::Client,
}

impl HttpFileFetcher {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn handles(location: &str) -> bool {
        let lowered = location.trim().to_lowercase();
        lowered.starts_with("http://") || lowered.starts_with("https://")
    }
}

impl Default for HttpFileFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileFetcher for HttpFileFetcher {
    async fn fetch_file(&self, location: &str) -> Result<String, ImportError> {
        debug!("Downloading file: {}", location);

        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", location, e);
                ImportError::Io(e.to_string())
            })?
            .error_for_status()
            .map_err(|e| {
                error!("Download of {} was refused: {}", location, e);
                ImportError::Io(e.to_string())
            })?;

        let bytes = response.bytes().await.map_err(|e| {
            error!("Failed to read body of {}: {}", location, e);
            ImportError::Io(e.to_string())
        })?;
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| ImportError::Encoding(format!("{}: {}", location, e)))?;

        info!("Downloaded {} bytes from {}", text.len(), location);
        Ok(text)
    }
}
