//! The CSV import core: header normalization, column mapping, row
//! transformation, validation, duplicate detection and summaries.
//!
//! Everything here is synchronous and free of I/O. One call to
//! [`run_import`] processes one text blob in source-row order and returns an
//! [`ImportResult`]; nothing is carried over between calls.

pub mod address;
pub mod customer;
pub mod customer_type;
pub mod dedupe;
pub mod mapper;
pub mod product;
pub mod summary;
pub mod transform;
pub mod validate;

use serde::Serialize;
use tracing::{debug, info, warn};
use crate::domain::error::ImportError;
use crate::domain::models::{
    ColumnOverride, FieldSchema, ImportResult, ImportedRow, MappingMode, TransformedRow,
};
use crate::infrastructure::parsers::csv_parser::parse_csv;
use self::dedupe::DuplicateDetector;
use self::mapper::resolve_columns;
use self::transform::transform_row;
use self::validate::validate_row;

pub use self::customer::CustomerImporter;
pub use self::product::ProductImporter;

/// An import fails overall when validation errors outnumber accepted rows
/// by more than this factor.
pub const DEFAULT_MAX_ERRORS_PER_ACCEPTED_ROW: usize = 1;

const MAPPING_HINT: &str = "Map the missing columns manually and retry the import";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    pub mapping_mode: MappingMode,
    pub max_errors_per_accepted_row: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            mapping_mode: MappingMode::Strict,
            max_errors_per_accepted_row: DEFAULT_MAX_ERRORS_PER_ACCEPTED_ROW,
        }
    }
}

impl ImportOptions {
    pub fn is_success(&self, accepted: usize, error_count: usize) -> bool {
        accepted > 0 && error_count <= accepted.saturating_mul(self.max_errors_per_accepted_row)
    }
}

/// What to do when a row repeats a natural key seen earlier in the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    Reject,
    Warn,
}

/// Domain-specific hooks around the shared row loop.
pub trait ImportPipeline {
    type Record: Serialize;
    type Summary: Serialize + Default;

    fn schema(&self) -> &'static FieldSchema;

    /// Row rules beyond the per-field checks.
    fn check_row(&self, _row: &TransformedRow) -> Vec<String> {
        Vec::new()
    }

    fn natural_key(&self, row: &TransformedRow) -> Option<String>;

    fn duplicate_policy(&self) -> DuplicatePolicy;

    fn duplicate_message(&self, row: &TransformedRow, key: &str, first_row: usize) -> String;

    fn build_record(&self, row: &TransformedRow, warnings: &mut Vec<String>) -> Self::Record;

    fn summarize(&self, rows: &[ImportedRow<Self::Record>]) -> Self::Summary;
}

/// Runs one import attempt end to end.
///
/// Structural failures (empty input, header-only input, unresolved required
/// columns without an override) come back as a failed result rather than an
/// error.
pub fn run_import<P: ImportPipeline>(
    pipeline: &P,
    text: &str,
    overrides: Option<&ColumnOverride>,
    options: &ImportOptions,
) -> ImportResult<P::Record, P::Summary> {
    let schema = pipeline.schema();
    debug!("Starting {} import ({} bytes)", schema.domain, text.len());

    let document = match parse_csv(text) {
        Ok(document) => document,
        Err(e) => {
            warn!("{} import aborted: {}", schema.domain, e);
            return ImportResult::structural_failure(Vec::new(), vec![e.to_string()], None);
        }
    };

    let overrides = overrides.filter(|o| !o.is_empty());
    let (mapping, diagnosis) =
        resolve_columns(&document.headers, schema, overrides, options.mapping_mode);
    if !diagnosis.is_valid && overrides.is_none() {
        let error = ImportError::UnresolvedMapping {
            missing: diagnosis.missing_required.clone(),
        };
        warn!("{} import aborted: {}", schema.domain, error);
        return ImportResult::structural_failure(
            document.headers,
            vec![error.to_string(), MAPPING_HINT.to_string()],
            Some(diagnosis.suggested_mappings),
        );
    }
    debug!("Resolved {} of {} columns", mapping.len(), document.headers.len());

    let mut data = Vec::new();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut rejected_rows = 0;
    let mut detector = DuplicateDetector::new();

    for raw in &document.rows {
        let mut row = transform_row(raw, &mapping, schema);
        let mut outcome = validate_row(&mut row);
        outcome.errors.extend(pipeline.check_row(&row));
        warnings.append(&mut outcome.warnings);

        if !outcome.is_valid() {
            debug!("Rejected row {} with {} errors", row.row_number, outcome.errors.len());
            errors.append(&mut outcome.errors);
            rejected_rows += 1;
            continue;
        }

        if let Some(key) = pipeline.natural_key(&row) {
            if let Some(first_row) = detector.check(&key, row.row_number) {
                let message = pipeline.duplicate_message(&row, &key, first_row);
                match pipeline.duplicate_policy() {
                    DuplicatePolicy::Reject => {
                        errors.push(message);
                        rejected_rows += 1;
                        continue;
                    }
                    DuplicatePolicy::Warn => warnings.push(message),
                }
            }
        }

        let record = pipeline.build_record(&row, &mut warnings);
        data.push(ImportedRow {
            row_number: row.row_number,
            record,
        });
    }

    let success = options.is_success(data.len(), errors.len());
    let summary = pipeline.summarize(&data);
    info!(
        "{} import finished: {} accepted, {} rejected, {} skipped, {} warnings, success={}",
        schema.domain,
        data.len(),
        rejected_rows,
        document.skipped_rows,
        warnings.len(),
        success
    );

    ImportResult {
        success,
        total_rows: document.rows.len(),
        skipped_rows: document.skipped_rows,
        rejected_rows,
        data,
        headers: document.headers,
        errors,
        warnings,
        summary,
        suggested_mappings: None,
    }
}
