//! Static field schemas and synonym tables for both import domains.

use crate::domain::models::{FieldSchema, FieldSpec, FieldType, ImportDomain};

pub const PRODUCT_ID: &str = "Product ID";
pub const BRAND: &str = "Brand";
pub const CATEGORY: &str = "Category";
pub const PRODUCT_NAME: &str = "Product Name";
pub const PRODUCT_NUMBER: &str = "Product Number";
pub const DESCRIPTION: &str = "Description";
pub const DEALER: &str = "Dealer";
pub const MSRP: &str = "MSRP";
pub const MAP: &str = "MAP";
pub const PRIMARY_DISTRIBUTOR: &str = "Primary Distributor";
pub const SECONDARY_DISTRIBUTOR: &str = "Secondary Distributor";
pub const TERTIARY_DISTRIBUTOR: &str = "Tertiary Distributor";
pub const SPEC_SHEET_URL: &str = "Spec Sheet URL";
pub const IMAGE_URL: &str = "Image URL";

pub const COMPANY_NAME: &str = "Company Name";
pub const CUSTOMER_TYPE: &str = "Customer Type";
pub const CONTACT_NAME: &str = "Contact Name";
pub const EMAIL: &str = "Email";
pub const PHONE: &str = "Phone";
pub const ROLE: &str = "Role";
pub const ADDRESS: &str = "Address";
pub const CITY: &str = "City";
pub const STATE: &str = "State";
pub const ZIP: &str = "Zip";
pub const COUNTRY: &str = "Country";
pub const SERVICE_ADDRESS: &str = "Service Address";
pub const SERVICE_CITY: &str = "Service City";
pub const SERVICE_STATE: &str = "Service State";
pub const SERVICE_ZIP: &str = "Service Zip";
pub const SERVICE_COUNTRY: &str = "Service Country";
pub const NOTES: &str = "Notes";
pub const TAGS: &str = "Tags";
pub const DATE_ADDED: &str = "Date Added";

const fn text(
    name: &'static str,
    required: bool,
    max_length: usize,
    aliases: &'static [&'static str],
    synonyms: &'static [&'static str],
) -> FieldSpec {
    FieldSpec {
        name,
        required,
        field_type: FieldType::Text,
        max_length: Some(max_length),
        aliases,
        synonyms,
    }
}

const fn typed(
    name: &'static str,
    field_type: FieldType,
    max_length: Option<usize>,
    synonyms: &'static [&'static str],
) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
        field_type,
        max_length,
        aliases: &[],
        synonyms,
    }
}

static PRODUCT_FIELDS: [FieldSpec; 14] = [
    text(
        PRODUCT_ID,
        true,
        100,
        &[],
        &["SKU", "Item ID", "Part Number", "Item Number", "Product Code"],
    ),
    text(BRAND, true, 100, &[], &["Manufacturer", "Make", "Vendor"]),
    text(
        CATEGORY,
        true,
        100,
        &[],
        &["Type", "Product Type", "Product Category", "Class"],
    ),
    text(
        PRODUCT_NAME,
        true,
        255,
        &[],
        &["Name", "Item Name", "Title", "Model"],
    ),
    text(
        PRODUCT_NUMBER,
        false,
        100,
        &[],
        &["Model Number", "Mfr Part Number", "MPN"],
    ),
    text(
        DESCRIPTION,
        false,
        2000,
        &[],
        &["Product Description", "Details", "Long Description"],
    ),
    typed(
        DEALER,
        FieldType::Decimal,
        None,
        &["Dealer Price", "Dealer Cost", "Cost"],
    ),
    typed(
        MSRP,
        FieldType::Decimal,
        None,
        &["List Price", "Retail Price", "Retail"],
    ),
    typed(
        MAP,
        FieldType::Decimal,
        None,
        &["MAP Price", "Minimum Advertised Price"],
    ),
    text(
        PRIMARY_DISTRIBUTOR,
        false,
        255,
        &[],
        &["Distributor", "Primary Supplier"],
    ),
    text(SECONDARY_DISTRIBUTOR, false, 255, &[], &["Secondary Supplier"]),
    text(TERTIARY_DISTRIBUTOR, false, 255, &[], &["Tertiary Supplier"]),
    typed(
        SPEC_SHEET_URL,
        FieldType::Url,
        Some(2048),
        &["Spec Sheet", "Datasheet", "Data Sheet URL", "Specifications"],
    ),
    typed(
        IMAGE_URL,
        FieldType::Url,
        Some(2048),
        &["Image", "Photo", "Picture", "Image Link"],
    ),
];

static CUSTOMER_FIELDS: [FieldSpec; 19] = [
    text(
        COMPANY_NAME,
        false,
        255,
        &["Name"],
        &["Company", "Business Name", "Customer Name", "Organization", "Client"],
    ),
    text(
        CUSTOMER_TYPE,
        false,
        50,
        &["Type"],
        &["Customer Category", "Segment"],
    ),
    text(
        CONTACT_NAME,
        false,
        255,
        &[],
        &["Contact", "Primary Contact", "Full Name"],
    ),
    typed(
        EMAIL,
        FieldType::Email,
        Some(255),
        &["E-mail", "Email Address", "Mail"],
    ),
    text(
        PHONE,
        false,
        50,
        &[],
        &["Phone Number", "Telephone", "Tel", "Mobile", "Cell"],
    ),
    text(ROLE, false, 100, &["Title"], &["Position", "Job Title"]),
    text(
        ADDRESS,
        false,
        255,
        &["Street"],
        &["Street Address", "Address 1", "Billing Address"],
    ),
    text(CITY, false, 100, &[], &["Town"]),
    text(STATE, false, 100, &[], &["Province", "Region"]),
    text(ZIP, false, 20, &[], &["Zip Code", "Postal Code", "Postcode"]),
    text(COUNTRY, false, 100, &[], &[]),
    text(
        SERVICE_ADDRESS,
        false,
        255,
        &["Service Street"],
        &["Site Address", "Install Address"],
    ),
    text(SERVICE_CITY, false, 100, &[], &["Site City"]),
    text(SERVICE_STATE, false, 100, &[], &["Site State"]),
    text(SERVICE_ZIP, false, 20, &[], &["Service Zip Code", "Site Zip"]),
    text(SERVICE_COUNTRY, false, 100, &[], &[]),
    text(NOTES, false, 2000, &[], &["Comments", "Note"]),
    text(TAGS, false, 500, &[], &["Labels", "Tag"]),
    typed(
        DATE_ADDED,
        FieldType::Date,
        None,
        &["Created", "Created At", "Date Created"],
    ),
];

pub static PRODUCT_SCHEMA: FieldSchema = FieldSchema {
    domain: ImportDomain::Product,
    fields: &PRODUCT_FIELDS,
};

pub static CUSTOMER_SCHEMA: FieldSchema = FieldSchema {
    domain: ImportDomain::Customer,
    fields: &CUSTOMER_FIELDS,
};

pub fn schema_for(domain: ImportDomain) -> &'static FieldSchema {
    match domain {
        ImportDomain::Product => &PRODUCT_SCHEMA,
        ImportDomain::Customer => &CUSTOMER_SCHEMA,
    }
}
