use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::error::ImportError;

/// Which import pipeline a file is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportDomain {
    Product,
    Customer,
}

impl ImportDomain {
    pub fn target_table(&self) -> &'static str {
        match self {
            ImportDomain::Product => "products",
            ImportDomain::Customer => "customers",
        }
    }
}

impl fmt::Display for ImportDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportDomain::Product => write!(f, "product"),
            ImportDomain::Customer => write!(f, "customer"),
        }
    }
}

impl FromStr for ImportDomain {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" | "products" => Ok(ImportDomain::Product),
            "customer" | "customers" => Ok(ImportDomain::Customer),
            other => Err(ImportError::UnknownDomain(other.to_string())),
        }
    }
}

/// How aggressively source headers are matched to schema fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingMode {
    /// Canonical names and documented aliases only. Synonyms only feed suggestions.
    #[default]
    Strict,
    /// Also auto-apply synonym and substring matches.
    Synonyms,
}

impl FromStr for MappingMode {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(MappingMode::Strict),
            "synonyms" => Ok(MappingMode::Synonyms),
            other => Err(ImportError::Config(format!("unknown mapping mode '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Decimal,
    Url,
    Email,
    Date,
}

/// One target column of an import schema.
#[derive(Debug, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub field_type: FieldType,
    pub max_length: Option<usize>,
    /// Alternative headers treated as exact matches.
    pub aliases: &'static [&'static str],
    /// Loose synonyms, used for suggestions and heuristic matching.
    pub synonyms: &'static [&'static str],
}

impl FieldSpec {
    pub fn label(&self) -> &'static str {
        self.name
    }

    /// Canonical name, then aliases, then synonyms.
    pub fn match_terms(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name)
            .chain(self.aliases.iter().copied())
            .chain(self.synonyms.iter().copied())
    }
}

#[derive(Debug, PartialEq)]
pub struct FieldSchema {
    pub domain: ImportDomain,
    pub fields: &'static [FieldSpec],
}

impl FieldSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// One tokenized data line, cells aligned with the header list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row_number: usize,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

/// Output of the header normalizer.
#[derive(Debug, Clone)]
pub struct CsvDocument {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    pub skipped_rows: usize,
    pub delimiter: u8,
}

/// Manual mapping supplied by the caller: source header -> canonical field name.
pub type ColumnOverride = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Override,
    Exact,
    Alias,
    Synonym,
    Substring,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAssignment {
    pub field: &'static str,
    pub header: String,
    pub column: usize,
    pub source: MatchSource,
}

/// Resolved source header -> field assignments for one import attempt.
///
/// Built once by the column mapper; there is no way to mutate it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    assignments: Vec<ColumnAssignment>,
}

impl ColumnMapping {
    pub(crate) fn new(assignments: Vec<ColumnAssignment>) -> Self {
        Self { assignments }
    }

    pub fn column_for(&self, field: &str) -> Option<usize> {
        self.assignment(field).map(|a| a.column)
    }

    pub fn header_for(&self, field: &str) -> Option<&str> {
        self.assignment(field).map(|a| a.header.as_str())
    }

    pub fn field_for(&self, header: &str) -> Option<&'static str> {
        self.assignments.iter().find(|a| a.header == header).map(|a| a.field)
    }

    pub fn assignment(&self, field: &str) -> Option<&ColumnAssignment> {
        self.assignments.iter().find(|a| a.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnAssignment> {
        self.assignments.iter()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingDiagnosis {
    pub is_valid: bool,
    pub missing_required: Vec<String>,
    pub unrecognized_headers: Vec<String>,
    pub suggested_mappings: BTreeMap<String, Vec<String>>,
}

/// A coerced cell. `Invalid` keeps a raw value the transformer could not
/// coerce so the validator can report it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Decimal(f64),
    Url(String),
    Email(String),
    Date(NaiveDate),
    Invalid(String),
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) | FieldValue::Url(s) | FieldValue::Email(s) | FieldValue::Invalid(s) => {
                s.trim().is_empty()
            }
            FieldValue::Decimal(_) | FieldValue::Date(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Url(s) | FieldValue::Email(s) | FieldValue::Invalid(s) => {
                Some(s.as_str())
            }
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            FieldValue::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

static NULL_VALUE: FieldValue = FieldValue::Null;

/// A raw row after type coercion; values are aligned with `schema.fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedRow {
    pub row_number: usize,
    pub schema: &'static FieldSchema,
    pub values: Vec<FieldValue>,
}

impl TransformedRow {
    /// A row with every field null.
    pub fn empty(row_number: usize, schema: &'static FieldSchema) -> Self {
        Self {
            row_number,
            schema,
            values: vec![FieldValue::Null; schema.fields.len()],
        }
    }

    pub fn get(&self, field: &str) -> &FieldValue {
        self.schema
            .index_of(field)
            .and_then(|i| self.values.get(i))
            .unwrap_or(&NULL_VALUE)
    }

    /// Owned, trimmed text for string-like values; empty otherwise.
    pub fn text(&self, field: &str) -> String {
        self.get(field).as_str().map(|s| s.trim().to_string()).unwrap_or_default()
    }

    pub fn set(&mut self, field: &str, value: FieldValue) -> bool {
        match self.schema.index_of(field) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &FieldValue)> {
        self.schema.fields.iter().zip(self.values.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// An accepted record tagged with its source row number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedRow<R> {
    pub row_number: usize,
    #[serde(flatten)]
    pub record: R,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult<R, S> {
    pub success: bool,
    pub data: Vec<ImportedRow<R>>,
    pub headers: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub summary: S,
    pub total_rows: usize,
    pub skipped_rows: usize,
    pub rejected_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_mappings: Option<BTreeMap<String, Vec<String>>>,
}

impl<R, S: Default> ImportResult<R, S> {
    /// A result for an import that aborted before row processing.
    pub fn structural_failure(
        headers: Vec<String>,
        errors: Vec<String>,
        suggested_mappings: Option<BTreeMap<String, Vec<String>>>,
    ) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            headers,
            errors,
            warnings: Vec::new(),
            summary: S::default(),
            total_rows: 0,
            skipped_rows: 0,
            rejected_rows: 0,
            suggested_mappings,
        }
    }

    pub fn accepted_rows(&self) -> usize {
        self.data.len()
    }
}

/// One entry of the import history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportLogEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub domain: ImportDomain,
    pub source: String,
    pub success: bool,
    pub total_rows: usize,
    pub accepted_rows: usize,
    pub rejected_rows: usize,
    pub inserted_rows: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<String>,
}
