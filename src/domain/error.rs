use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("CSV file is empty")]
    EmptyInput,

    #[error("CSV file contains no data rows")]
    NoDataRows,

    #[error("Missing required columns: {}", missing.join(", "))]
    UnresolvedMapping { missing: Vec<String> },

    #[error("Failed to parse CSV: {0}")]
    Parse(String),

    #[error("File is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unknown import domain: {0}")]
    UnknownDomain(String),
}

impl ImportError {
    /// Structural failures abort an import before any row is processed.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ImportError::EmptyInput | ImportError::NoDataRows | ImportError::UnresolvedMapping { .. }
        )
    }
}
