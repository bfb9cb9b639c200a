use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use chrono::Utc;
use crate::application::import::{CustomerImporter, ImportOptions, ProductImporter};
use crate::config::ImportRequest;
use crate::domain::{
    error::ImportError,
    models::{ImportDomain, ImportLogEntry, ImportResult},
    ports::{DataRepository, FileFetcher, ImportLogRepository},
};

/// Errors kept on a history entry.
const LOGGED_ERROR_LIMIT: usize = 10;

/// Outcome of one `process_file` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub id: Uuid,
    pub domain: ImportDomain,
    pub source: String,
    pub success: bool,
    pub total_rows: usize,
    pub accepted_rows: usize,
    pub rejected_rows: usize,
    pub skipped_rows: usize,
    pub inserted_rows: usize,
    pub batches: usize,
    pub headers: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_mappings: Option<BTreeMap<String, Vec<String>>>,
    pub summary: serde_json::Value,
}

/// An import result with its records already converted to documents.
struct PreparedImport {
    success: bool,
    documents: Vec<serde_json::Value>,
    total_rows: usize,
    rejected_rows: usize,
    skipped_rows: usize,
    headers: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
    suggested_mappings: Option<BTreeMap<String, Vec<String>>>,
    summary: serde_json::Value,
}

impl PreparedImport {
    fn from_result<R: Serialize, S: Serialize>(result: ImportResult<R, S>) -> Result<Self, ImportError> {
        let documents = result
            .data
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ImportError::Repository(format!("failed to serialize record: {}", e)))?;
        let summary = serde_json::to_value(&result.summary)
            .map_err(|e| ImportError::Repository(format!("failed to serialize summary: {}", e)))?;
        Ok(Self {
            success: result.success,
            documents,
            total_rows: result.total_rows,
            rejected_rows: result.rejected_rows,
            skipped_rows: result.skipped_rows,
            headers: result.headers,
            errors: result.errors,
            warnings: result.warnings,
            suggested_mappings: result.suggested_mappings,
            summary,
        })
    }
}

/// Fetches a CSV file, runs it through the matching pipeline, stores the
/// accepted rows in batches and records the attempt in the import history.
pub struct ImportService {
    file_fetcher: Arc<dyn FileFetcher>,
    data_repo: Arc<dyn DataRepository>,
    log_repo: Arc<dyn ImportLogRepository>,
    options: ImportOptions,
    batch_size: usize,
}

impl ImportService {
    pub fn new(
        file_fetcher: Arc<dyn FileFetcher>,
        data_repo: Arc<dyn DataRepository>,
        log_repo: Arc<dyn ImportLogRepository>,
        options: ImportOptions,
        batch_size: usize,
    ) -> Self {
        Self {
            file_fetcher,
            data_repo,
            log_repo,
            options,
            batch_size: batch_size.max(1),
        }
    }

    pub async fn process_file(&self, request: ImportRequest) -> Result<ImportReport, ImportError> {
        info!("Starting {} import: {}", request.domain, request.location);

        // Step 1: Fetch file
        debug!("Step 1: Fetching file: {}", request.location);
        let text = self.file_fetcher.fetch_file(&request.location).await
            .map_err(|e| {
                error!("Failed to fetch file {}: {}", request.location, e);
                e
            })?;
        info!("Fetched file, size: {} bytes", text.len());

        // Step 2: Run the import pipeline
        debug!("Step 2: Running {} pipeline", request.domain);
        let overrides = request.overrides.as_ref();
        let prepared = match request.domain {
            ImportDomain::Product => PreparedImport::from_result(
                ProductImporter::new(self.options).parse(&text, overrides),
            )?,
            ImportDomain::Customer => PreparedImport::from_result(
                CustomerImporter::new(self.options)
                    .with_customer_type(request.customer_type)
                    .parse(&text, overrides),
            )?,
        };
        if !prepared.errors.is_empty() {
            warn!("{} rows of {} rejected in {}", prepared.rejected_rows, prepared.total_rows, request.location);
        }

        // Step 3: Store accepted rows
        let target_table = request.domain.target_table();
        let (inserted_rows, batches) = if prepared.success {
            debug!("Step 3: Storing {} documents to table: {}", prepared.documents.len(), target_table);
            self.store(target_table, &prepared.documents).await
                .map_err(|e| {
                    error!("Failed to store documents for {}: {}", request.location, e);
                    e
                })?
        } else {
            warn!("Import of {} failed, nothing stored", request.location);
            (0, 0)
        };

        let report = ImportReport {
            id: Uuid::new_v4(),
            domain: request.domain,
            source: request.location,
            success: prepared.success,
            total_rows: prepared.total_rows,
            accepted_rows: prepared.documents.len(),
            rejected_rows: prepared.rejected_rows,
            skipped_rows: prepared.skipped_rows,
            inserted_rows,
            batches,
            headers: prepared.headers,
            errors: prepared.errors,
            warnings: prepared.warnings,
            suggested_mappings: prepared.suggested_mappings,
            summary: prepared.summary,
        };

        // Step 4: Record the attempt
        debug!("Step 4: Appending import log entry {}", report.id);
        self.log_repo.append(log_entry(&report)).await
            .map_err(|e| {
                error!("Failed to record import {}: {}", report.id, e);
                e
            })?;

        info!("✅ Processed {} - {} of {} rows stored in {}",
            report.source, report.inserted_rows, report.total_rows, target_table);
        Ok(report)
    }

    /// Inserts documents in source order, `batch_size` at a time.
    async fn store(&self, target_table: &str, documents: &[serde_json::Value]) -> Result<(usize, usize), ImportError> {
        let mut inserted = 0;
        let mut batches = 0;
        for chunk in documents.chunks(self.batch_size) {
            debug!("Inserting batch {} ({} documents) into {}", batches + 1, chunk.len(), target_table);
            self.data_repo.insert_documents(target_table, chunk).await?;
            inserted += chunk.len();
            batches += 1;
        }
        Ok((inserted, batches))
    }

    pub async fn recent_imports(&self, limit: usize) -> Result<Vec<ImportLogEntry>, ImportError> {
        self.log_repo.recent(limit).await
    }
}

fn log_entry(report: &ImportReport) -> ImportLogEntry {
    ImportLogEntry {
        id: report.id,
        recorded_at: Utc::now(),
        domain: report.domain,
        source: report.source.clone(),
        success: report.success,
        total_rows: report.total_rows,
        accepted_rows: report.accepted_rows,
        rejected_rows: report.rejected_rows,
        inserted_rows: report.inserted_rows,
        error_count: report.errors.len(),
        warning_count: report.warnings.len(),
        errors: report.errors.iter().take(LOGGED_ERROR_LIMIT).cloned().collect(),
    }
}
