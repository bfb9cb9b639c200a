use tracing::debug;
use crate::domain::records::CustomerType;

const RESIDENTIAL_KEYWORDS: [&str; 5] = ["residence", "home", "house", "family", "personal"];
const COMMERCIAL_KEYWORDS: [&str; 6] = ["llc", "inc", "corp", "company", "business", "enterprise"];

/// Guesses the customer type from a company or contact name.
///
/// Residential keywords are checked first. Names matching neither list
/// default to commercial.
pub fn infer_customer_type(name: &str) -> CustomerType {
    let lowered = name.to_lowercase();
    if RESIDENTIAL_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return CustomerType::Residential;
    }
    if !COMMERCIAL_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        debug!("No type keyword in '{}', defaulting to commercial", name);
    }
    CustomerType::Commercial
}

/// Reads an explicit customer type cell.
pub fn parse_customer_type(raw: &str) -> Option<CustomerType> {
    match raw.trim().to_lowercase().as_str() {
        "residential" | "res" | "residence" => Some(CustomerType::Residential),
        "commercial" | "com" | "comm" | "business" => Some(CustomerType::Commercial),
        _ => None,
    }
}
