use once_cell::sync::Lazy;
use regex::Regex;
use crate::domain::models::{FieldSpec, FieldType, FieldValue, TransformedRow, ValidationOutcome};

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").expect("valid url regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn is_valid_url(value: &str) -> bool {
    URL_RE.is_match(value.trim())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Applies per-field rules to one row.
///
/// Every field is checked; a failed required check skips the remaining
/// checks for that field only. Malformed emails and unparseable dates are
/// demoted to warnings and the field is nulled in place.
pub fn validate_row(row: &mut TransformedRow) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();
    let n = row.row_number;
    let schema = row.schema;

    for (field, value) in schema.fields.iter().zip(row.values.iter_mut()) {
        let label = field.label();
        if value.is_missing() {
            if field.required {
                outcome.errors.push(format!("Row {}: {} is required", n, label));
            }
            continue;
        }

        match field.field_type {
            FieldType::Email => {
                if let Some(email) = value.as_str() {
                    if !is_valid_email(email) {
                        outcome.warnings.push(format!(
                            "Row {}: Invalid email format \"{}\" - email will be ignored",
                            n, email
                        ));
                        *value = FieldValue::Null;
                        continue;
                    }
                }
            }
            FieldType::Date => {
                if let FieldValue::Invalid(raw) = value {
                    outcome.warnings.push(format!(
                        "Row {}: {} \"{}\" is not a recognized date and was ignored",
                        n, label, raw
                    ));
                    *value = FieldValue::Null;
                    continue;
                }
            }
            FieldType::Decimal => match value {
                FieldValue::Decimal(v) if *v < 0.0 => {
                    outcome.errors.push(format!("Row {}: {} must be a positive number", n, label));
                }
                FieldValue::Decimal(_) => {}
                _ => {
                    outcome.errors.push(format!(
                        "Row {}: {} must be a valid positive number or empty",
                        n, label
                    ));
                }
            },
            FieldType::Url => {
                if !value.as_str().map(is_valid_url).unwrap_or(false) {
                    outcome.errors.push(format!(
                        "Row {}: {} must be a valid URL starting with http:// or https://",
                        n, label
                    ));
                }
            }
            FieldType::Text => {}
        }

        if let Some(error) = check_length(field, value, n) {
            outcome.errors.push(error);
        }
    }

    outcome
}

fn check_length(field: &FieldSpec, value: &FieldValue, row_number: usize) -> Option<String> {
    let max = field.max_length?;
    let text = value.as_str()?;
    (text.chars().count() > max).then(|| {
        format!(
            "Row {}: {} must be {} characters or less",
            row_number,
            field.label(),
            max
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{CUSTOMER_SCHEMA, PRODUCT_SCHEMA};

    fn valid_product(row_number: usize) -> TransformedRow {
        let mut row = TransformedRow::empty(row_number, &PRODUCT_SCHEMA);
        row.set("Product ID", FieldValue::Text("P1".into()));
        row.set("Brand", FieldValue::Text("Acme".into()));
        row.set("Category", FieldValue::Text("Audio".into()));
        row.set("Product Name", FieldValue::Text("Speaker".into()));
        row
    }

    #[test]
    fn complete_row_passes() {
        let mut row = valid_product(2);
        row.set("MSRP", FieldValue::Decimal(0.0));
        row.set("Image URL", FieldValue::Url("https://cdn.example.com/a.png".into()));
        let outcome = validate_row(&mut row);
        assert!(outcome.is_valid(), "{:?}", outcome.errors);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn missing_required_fields_accumulate_in_field_order() {
        let mut row = TransformedRow::empty(7, &PRODUCT_SCHEMA);
        row.set("Brand", FieldValue::Text("Acme".into()));
        row.set("Product ID", FieldValue::Text("  ".into()));
        let outcome = validate_row(&mut row);
        assert_eq!(
            outcome.errors,
            vec![
                "Row 7: Product ID is required",
                "Row 7: Category is required",
                "Row 7: Product Name is required",
            ]
        );
    }

    #[test]
    fn numeric_sign_and_type_errors() {
        let mut row = valid_product(3);
        row.set("Dealer", FieldValue::Decimal(-1.5));
        row.set("MAP", FieldValue::Invalid("cheap".into()));
        let outcome = validate_row(&mut row);
        assert_eq!(
            outcome.errors,
            vec![
                "Row 3: Dealer must be a positive number",
                "Row 3: MAP must be a valid positive number or empty",
            ]
        );
    }

    #[test]
    fn url_and_length_checks() {
        let mut row = valid_product(4);
        row.set("Spec Sheet URL", FieldValue::Text("example.com/spec.pdf".into()));
        row.set("Brand", FieldValue::Text("x".repeat(101)));
        let outcome = validate_row(&mut row);
        assert_eq!(
            outcome.errors,
            vec![
                "Row 4: Brand must be 100 characters or less",
                "Row 4: Spec Sheet URL must be a valid URL starting with http:// or https://",
            ]
        );
    }

    #[test]
    fn bad_email_is_a_warning_and_nulled() {
        let mut row = TransformedRow::empty(2, &CUSTOMER_SCHEMA);
        row.set("Company Name", FieldValue::Text("Acme".into()));
        row.set("Email", FieldValue::Email("not-an-email".into()));
        let outcome = validate_row(&mut row);
        assert!(outcome.is_valid());
        assert_eq!(
            outcome.warnings,
            vec!["Row 2: Invalid email format \"not-an-email\" - email will be ignored"]
        );
        assert_eq!(row.get("Email"), &FieldValue::Null);
    }

    #[test]
    fn bad_date_is_a_warning() {
        let mut row = TransformedRow::empty(9, &CUSTOMER_SCHEMA);
        row.set("Date Added", FieldValue::Invalid("someday".into()));
        let outcome = validate_row(&mut row);
        assert!(outcome.is_valid());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(row.get("Date Added"), &FieldValue::Null);
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a.b@example.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
    }
}
