use tracing::debug;
use crate::application::import::{
    address::{build_address, AddressParts},
    customer_type::{infer_customer_type, parse_customer_type},
    mapper, run_import,
    summary::summarize_customers,
    DuplicatePolicy, ImportOptions, ImportPipeline,
};
use crate::domain::{
    models::{ColumnOverride, FieldSchema, ImportResult, ImportedRow, MappingDiagnosis, TransformedRow},
    records::{CustomerRecord, CustomerSummary, CustomerType},
    schema::{self, CUSTOMER_SCHEMA},
};

pub type CustomerImportResult = ImportResult<CustomerRecord, CustomerSummary>;

/// Customer list importer.
///
/// A pinned customer type applies to every row and disables both the
/// `Customer Type` column and name-based inference.
#[derive(Debug, Clone, Default)]
pub struct CustomerImporter {
    options: ImportOptions,
    pinned_type: Option<CustomerType>,
}

impl CustomerImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self {
            options,
            pinned_type: None,
        }
    }

    pub fn with_customer_type(mut self, customer_type: Option<CustomerType>) -> Self {
        self.pinned_type = customer_type;
        self
    }

    pub fn parse(&self, text: &str, overrides: Option<&ColumnOverride>) -> CustomerImportResult {
        run_import(self, text, overrides, &self.options)
    }

    pub fn validate_column_mapping(&self, headers: &[String]) -> MappingDiagnosis {
        mapper::validate_column_mapping(headers, &CUSTOMER_SCHEMA, self.options.mapping_mode)
    }

    fn resolve_type(&self, row: &TransformedRow, name: &str, warnings: &mut Vec<String>) -> CustomerType {
        if let Some(pinned) = self.pinned_type {
            return pinned;
        }
        let explicit = row.text(schema::CUSTOMER_TYPE);
        if !explicit.is_empty() {
            match parse_customer_type(&explicit) {
                Some(customer_type) => return customer_type,
                None => warnings.push(format!(
                    "Row {}: Unknown customer type \"{}\" - type will be inferred",
                    row.row_number, explicit
                )),
            }
        }
        let inferred = infer_customer_type(name);
        debug!("Row {}: inferred {} from '{}'", row.row_number, inferred, name);
        inferred
    }
}

/// Company name, falling back to the contact name.
fn display_name(row: &TransformedRow) -> String {
    let company = row.text(schema::COMPANY_NAME);
    if company.is_empty() {
        row.text(schema::CONTACT_NAME)
    } else {
        company
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(|c: char| c == ',' || c == ';').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

impl ImportPipeline for CustomerImporter {
    type Record = CustomerRecord;
    type Summary = CustomerSummary;

    fn schema(&self) -> &'static FieldSchema {
        &CUSTOMER_SCHEMA
    }

    fn check_row(&self, row: &TransformedRow) -> Vec<String> {
        if display_name(row).is_empty() {
            vec![format!(
                "Row {}: Company Name or Contact Name is required",
                row.row_number
            )]
        } else {
            Vec::new()
        }
    }

    fn natural_key(&self, row: &TransformedRow) -> Option<String> {
        let company = row.text(schema::COMPANY_NAME).to_lowercase();
        let contact = row.text(schema::CONTACT_NAME).to_lowercase();
        if company.is_empty() && contact.is_empty() {
            return None;
        }
        Some(format!("{}|{}", company, contact))
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        DuplicatePolicy::Warn
    }

    fn duplicate_message(&self, row: &TransformedRow, _key: &str, first_row: usize) -> String {
        format!(
            "Row {}: Possible duplicate customer \"{}\" (first seen on row {})",
            row.row_number,
            display_name(row),
            first_row
        )
    }

    fn build_record(&self, row: &TransformedRow, warnings: &mut Vec<String>) -> CustomerRecord {
        let company_name = display_name(row);
        let customer_type = self.resolve_type(row, &company_name, warnings);

        let billing_address = build_address(AddressParts {
            street: row.get(schema::ADDRESS).as_str().unwrap_or(""),
            city: row.get(schema::CITY).as_str().unwrap_or(""),
            state: row.get(schema::STATE).as_str().unwrap_or(""),
            zip: row.get(schema::ZIP).as_str().unwrap_or(""),
            country: row.get(schema::COUNTRY).as_str().unwrap_or(""),
        });
        let service_address = build_address(AddressParts {
            street: row.get(schema::SERVICE_ADDRESS).as_str().unwrap_or(""),
            city: row.get(schema::SERVICE_CITY).as_str().unwrap_or(""),
            state: row.get(schema::SERVICE_STATE).as_str().unwrap_or(""),
            zip: row.get(schema::SERVICE_ZIP).as_str().unwrap_or(""),
            country: row.get(schema::SERVICE_COUNTRY).as_str().unwrap_or(""),
        });
        let service_address = if service_address.is_empty() {
            billing_address.clone()
        } else {
            service_address
        };

        CustomerRecord {
            company_name,
            customer_type,
            contact_name: row.text(schema::CONTACT_NAME),
            email: row.get(schema::EMAIL).as_str().map(str::to_string),
            phone: row.text(schema::PHONE),
            role: row.text(schema::ROLE),
            billing_address,
            service_address,
            notes: row.text(schema::NOTES),
            tags: split_tags(&row.text(schema::TAGS)),
            date_added: row.get(schema::DATE_ADDED).as_date(),
        }
    }

    fn summarize(&self, rows: &[ImportedRow<CustomerRecord>]) -> CustomerSummary {
        summarize_customers(rows)
    }
}
