use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use crate::domain::models::{ColumnMapping, FieldType, FieldValue, RawRow, TransformedRow, FieldSchema};

/// Tokens that mean "no price" rather than a malformed price.
const PRICE_PLACEHOLDERS: [&str; 6] = ["n/a", "na", "tbd", "call", "contact", "quote"];
const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

static THOUSANDS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d{1,3}(?:,\d{3})+$").expect("valid thousands regex"));

/// Coerces one raw row into typed values aligned with the schema.
///
/// Unmapped source columns are dropped. A field with no source column is
/// treated exactly like a blank cell.
pub fn transform_row(raw: &RawRow, mapping: &ColumnMapping, schema: &'static FieldSchema) -> TransformedRow {
    let values = schema
        .fields
        .iter()
        .map(|field| {
            let cell = mapping
                .column_for(field.name)
                .and_then(|column| raw.cell(column))
                .unwrap_or("");
            coerce(field.field_type, cell)
        })
        .collect();
    TransformedRow {
        row_number: raw.row_number,
        schema,
        values,
    }
}

pub fn coerce(field_type: FieldType, raw: &str) -> FieldValue {
    match field_type {
        FieldType::Text => FieldValue::Text(raw.trim().to_string()),
        FieldType::Decimal => coerce_decimal(raw),
        FieldType::Url => normalize_url(raw).map(FieldValue::Url).unwrap_or(FieldValue::Null),
        FieldType::Email => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                FieldValue::Null
            } else {
                FieldValue::Email(trimmed.to_string())
            }
        }
        FieldType::Date => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                FieldValue::Null
            } else {
                parse_date(trimmed)
                    .map(FieldValue::Date)
                    .unwrap_or_else(|| FieldValue::Invalid(trimmed.to_string()))
            }
        }
    }
}

/// Parses a price cell.
///
/// Blank cells and placeholder tokens become `Null`. When both `.` and `,`
/// appear, the last one is the decimal mark (`1.299,00` and `1,299.00` are
/// the same price). A lone comma is a thousands separator only in `1,234`
/// grouping, otherwise it is the decimal mark. Anything that still fails to
/// parse is kept as `Invalid` for the validator.
pub fn coerce_decimal(raw: &str) -> FieldValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_price_placeholder(trimmed) {
        return FieldValue::Null;
    }
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && !c.is_whitespace())
        .collect();
    match normalize_decimal_marks(&cleaned).and_then(|n| n.parse::<f64>().ok()) {
        Some(value) if value.is_finite() => FieldValue::Decimal(value),
        _ => {
            debug!("Could not parse price '{}'", trimmed);
            FieldValue::Invalid(trimmed.to_string())
        }
    }
}

/// Rewrites a number to use `.` as the only decimal mark.
fn normalize_decimal_marks(number: &str) -> Option<String> {
    let last_dot = number.rfind('.');
    let last_comma = number.rfind(',');
    match (last_dot, last_comma) {
        (Some(dot), Some(comma)) if comma > dot => {
            // 1.299,00
            Some(number.replace('.', "").replace(',', "."))
        }
        (Some(_), Some(_)) => Some(number.replace(',', "")),
        (None, Some(_)) if THOUSANDS_RE.is_match(number) => Some(number.replace(',', "")),
        (None, Some(_)) if number.matches(',').count() == 1 => Some(number.replace(',', ".")),
        (None, Some(_)) => None,
        _ => Some(number.to_string()),
    }
}

pub fn is_price_placeholder(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    PRICE_PLACEHOLDERS.contains(&lowered.as_str())
}

/// Returns the trimmed URL when it has an http(s) scheme.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let lowered = trimmed.to_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        if !trimmed.is_empty() {
            debug!("Dropping URL without http(s) scheme: '{}'", trimmed);
        }
        None
    }
}

/// Parses `Date Added` cells.
///
/// The segment layout picks the format: a four-digit first segment is
/// year-first, otherwise the last segment is the year (`M/D/YYYY`, `M/D/YY`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    let separator = if raw.contains('/') { '/' } else { '-' };
    let segments: Vec<&str> = raw.split(separator).collect();
    if segments.len() != 3 || !segments.iter().all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    let format = match (separator, segments[0].len(), segments[2].len()) {
        ('-', 4, _) => "%Y-%m-%d",
        ('/', 4, _) => "%Y/%m/%d",
        ('/', _, 4) => "%m/%d/%Y",
        ('/', _, 2) => "%m/%d/%y",
        _ => return None,
    };
    NaiveDate::parse_from_str(raw, format).ok()
}
