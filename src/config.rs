use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};
use crate::application::import::{ImportOptions, DEFAULT_MAX_ERRORS_PER_ACCEPTED_ROW};
use crate::domain::{
    error::ImportError,
    models::{ColumnOverride, ImportDomain, MappingMode},
    records::CustomerType,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportSettings {
    /// Accepted rows per insert call.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Import history entries kept in memory.
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
    #[serde(default = "default_max_errors_per_accepted_row")]
    pub max_errors_per_accepted_row: usize,
    #[serde(default)]
    pub mapping_mode: MappingMode,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_batch_size() -> usize {
    50
}
fn default_log_capacity() -> usize {
    50
}
fn default_max_errors_per_accepted_row() -> usize {
    DEFAULT_MAX_ERRORS_PER_ACCEPTED_ROW
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./imports")
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            log_capacity: default_log_capacity(),
            max_errors_per_accepted_row: default_max_errors_per_accepted_row(),
            mapping_mode: MappingMode::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl ImportSettings {
    /// Reads `IMPORT_CONFIG` (if set) and applies env overrides on top.
    pub fn load() -> Result<Self, ImportError> {
        let mut settings = match std::env::var("IMPORT_CONFIG") {
            Ok(path) => {
                info!("Loading import settings from {}", path);
                Self::from_file(Path::new(&path))?
            }
            Err(_) => {
                debug!("IMPORT_CONFIG not set, using default settings");
                Self::default()
            }
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        settings.validate()?;
        debug!("Effective import settings: {:?}", settings);
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ImportError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ImportError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ImportError> {
        serde_yaml::from_str(raw).map_err(|e| ImportError::Config(e.to_string()))
    }

    /// Applies `IMPORT_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ImportError> {
        if let Some(value) = lookup("IMPORT_BATCH_SIZE") {
            self.batch_size = parse_var("IMPORT_BATCH_SIZE", &value)?;
        }
        if let Some(value) = lookup("IMPORT_LOG_CAPACITY") {
            self.log_capacity = parse_var("IMPORT_LOG_CAPACITY", &value)?;
        }
        if let Some(value) = lookup("IMPORT_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("IMPORT_MAPPING_MODE") {
            self.mapping_mode = value.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ImportError> {
        if self.batch_size == 0 {
            return Err(ImportError::Config("batch_size must be at least 1".to_string()));
        }
        if self.log_capacity == 0 {
            return Err(ImportError::Config("log_capacity must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            mapping_mode: self.mapping_mode,
            max_errors_per_accepted_row: self.max_errors_per_accepted_row,
        }
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, ImportError> {
    value
        .trim()
        .parse()
        .map_err(|_| ImportError::Config(format!("{} has invalid value '{}'", key, value)))
}

/// One file to import, as requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub location: String,
    pub domain: ImportDomain,
    pub overrides: Option<ColumnOverride>,
    pub customer_type: Option<CustomerType>,
}

impl ImportRequest {
    pub fn new(location: impl Into<String>, domain: ImportDomain) -> Self {
        Self {
            location: location.into(),
            domain,
            overrides: None,
            customer_type: None,
        }
    }

    /// Builds a request from `IMPORT_FILE`, `IMPORT_DOMAIN`,
    /// `IMPORT_MAPPING_FILE` and `IMPORT_CUSTOMER_TYPE`.
    pub fn from_env() -> Result<Self, ImportError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ImportError> {
        let location = lookup("IMPORT_FILE")
            .ok_or_else(|| ImportError::Config("IMPORT_FILE environment variable is required".to_string()))?;
        let domain = match lookup("IMPORT_DOMAIN") {
            Some(value) => value.parse()?,
            None => ImportDomain::Product,
        };
        let overrides = match lookup("IMPORT_MAPPING_FILE") {
            Some(path) => Some(load_column_override(Path::new(&path))?),
            None => None,
        };
        let customer_type = match lookup("IMPORT_CUSTOMER_TYPE") {
            Some(value) => Some(
                crate::application::import::customer_type::parse_customer_type(&value)
                    .ok_or_else(|| ImportError::Config(format!("unknown customer type '{}'", value)))?,
            ),
            None => None,
        };
        Ok(Self {
            location,
            domain,
            overrides,
            customer_type,
        })
    }
}

/// Reads a manual column mapping (YAML or JSON object of header -> field).
pub fn load_column_override(path: &Path) -> Result<ColumnOverride, ImportError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ImportError::Config(format!("{}: {}", path.display(), e)))?;
    let mapping: ColumnOverride =
        serde_yaml::from_str(&raw).map_err(|e| ImportError::Config(e.to_string()))?;
    info!("Loaded {} manual column mappings from {}", mapping.len(), path.display());
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn yaml_fields_default_individually() {
        let settings = ImportSettings::from_yaml("batch_size: 10\nmapping_mode: synonyms\n").unwrap();
        assert_eq!(settings.batch_size, 10);
        assert_eq!(settings.mapping_mode, MappingMode::Synonyms);
        assert_eq!(settings.log_capacity, 50);
        assert_eq!(settings.max_errors_per_accepted_row, 1);
    }

    #[test]
    fn env_overrides_apply_and_validate() {
        let mut settings = ImportSettings::default();
        settings
            .apply_overrides(lookup(&[("IMPORT_BATCH_SIZE", "25"), ("IMPORT_OUTPUT_DIR", "/tmp/out")]))
            .unwrap();
        assert_eq!(settings.batch_size, 25);
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/out"));

        let err = settings
            .apply_overrides(lookup(&[("IMPORT_BATCH_SIZE", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ImportError::Config(_)));

        settings.batch_size = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn request_from_lookup() {
        let request = ImportRequest::from_lookup(lookup(&[
            ("IMPORT_FILE", "customers.csv"),
            ("IMPORT_DOMAIN", "customer"),
            ("IMPORT_CUSTOMER_TYPE", "residential"),
        ]))
        .unwrap();
        assert_eq!(request.domain, ImportDomain::Customer);
        assert_eq!(request.customer_type, Some(CustomerType::Residential));
        assert!(request.overrides.is_none());

        assert!(ImportRequest::from_lookup(lookup(&[])).is_err());
        assert!(ImportRequest::from_lookup(lookup(&[("IMPORT_FILE", "x"), ("IMPORT_DOMAIN", "orders")])).is_err());
    }

    #[test]
    fn column_override_reads_json_and_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"SKU\": \"Product ID\", \"Maker\": \"Brand\"}}").unwrap();
        let mapping = load_column_override(file.path()).unwrap();
        assert_eq!(mapping.get("SKU").map(String::as_str), Some("Product ID"));

        let mut yaml = tempfile::NamedTempFile::new().unwrap();
        writeln!(yaml, "Item Name: Product Name").unwrap();
        let mapping = load_column_override(yaml.path()).unwrap();
        assert_eq!(mapping.get("Item Name").map(String::as_str), Some("Product Name"));
    }
}
