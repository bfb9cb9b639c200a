use crate::application::import::{
    mapper, run_import, summary::summarize_products, DuplicatePolicy, ImportOptions, ImportPipeline,
};
use crate::domain::{
    models::{ColumnOverride, FieldSchema, ImportResult, ImportedRow, MappingDiagnosis, TransformedRow},
    records::{ProductRecord, ProductSummary},
    schema::{self, PRODUCT_SCHEMA},
};

pub type ProductImportResult = ImportResult<ProductRecord, ProductSummary>;

/// Product list importer. Rows are keyed by `Product ID`; repeats within
/// one file are rejected.
#[derive(Debug, Clone, Default)]
pub struct ProductImporter {
    options: ImportOptions,
}

impl ProductImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn parse(&self, text: &str, overrides: Option<&ColumnOverride>) -> ProductImportResult {
        run_import(self, text, overrides, &self.options)
    }

    pub fn validate_column_mapping(&self, headers: &[String]) -> MappingDiagnosis {
        mapper::validate_column_mapping(headers, &PRODUCT_SCHEMA, self.options.mapping_mode)
    }
}

impl ImportPipeline for ProductImporter {
    type Record = ProductRecord;
    type Summary = ProductSummary;

    fn schema(&self) -> &'static FieldSchema {
        &PRODUCT_SCHEMA
    }

    fn natural_key(&self, row: &TransformedRow) -> Option<String> {
        Some(row.text(schema::PRODUCT_ID)).filter(|k| !k.is_empty())
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        DuplicatePolicy::Reject
    }

    fn duplicate_message(&self, row: &TransformedRow, key: &str, _first_row: usize) -> String {
        format!(
            "Row {}: Duplicate Product ID \"{}\" found in this import",
            row.row_number, key
        )
    }

    fn build_record(&self, row: &TransformedRow, _warnings: &mut Vec<String>) -> ProductRecord {
        let url = |field: &str| row.get(field).as_str().map(str::to_string);
        ProductRecord {
            product_id: row.text(schema::PRODUCT_ID),
            brand: row.text(schema::BRAND),
            category: row.text(schema::CATEGORY),
            name: row.text(schema::PRODUCT_NAME),
            product_number: row.text(schema::PRODUCT_NUMBER),
            description: row.text(schema::DESCRIPTION),
            dealer_price: row.get(schema::DEALER).as_decimal(),
            msrp: row.get(schema::MSRP).as_decimal(),
            map_price: row.get(schema::MAP).as_decimal(),
            primary_distributor: row.text(schema::PRIMARY_DISTRIBUTOR),
            secondary_distributor: row.text(schema::SECONDARY_DISTRIBUTOR),
            tertiary_distributor: row.text(schema::TERTIARY_DISTRIBUTOR),
            spec_sheet_url: url(schema::SPEC_SHEET_URL),
            image_url: url(schema::IMAGE_URL),
        }
    }

    fn summarize(&self, rows: &[ImportedRow<ProductRecord>]) -> ProductSummary {
        summarize_products(rows)
    }
}
