use catalog_import::application::import::transform::coerce_decimal;
use catalog_import::application::import::{ImportOptions, ProductImporter};
use catalog_import::domain::models::{ColumnOverride, FieldValue, MappingMode};

const HEADER: &str = "Product ID,Brand,Category,Product Name";

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| h.to_string()).collect()
}

#[test]
fn scenario_single_valid_row() {
    let result = ProductImporter::default().parse("Product ID,Brand,Category,Product Name\nPROD1,Acme,Audio,Speaker", None);
    assert!(result.success);
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.summary.total_products, 1);
    assert_eq!(result.data[0].record.product_id, "PROD1");
}

#[test]
fn scenario_duplicate_product_id() {
    let text = format!("{}\nPROD1,Acme,Audio,Speaker\nPROD1,Acme,Audio,Speaker", HEADER);
    let result = ProductImporter::default().parse(&text, None);
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].row_number, 2);
    assert_eq!(result.rejected_rows, 1);
    assert!(result.errors.iter().any(|e| e.contains("Duplicate Product ID")));
}

#[test]
fn scenario_empty_input() {
    let result = ProductImporter::default().parse("", None);
    assert!(!result.success);
    assert_eq!(result.errors, vec!["CSV file is empty"]);
    assert!(result.data.is_empty());
}

#[test]
fn scenario_header_only() {
    let result = ProductImporter::default().parse(HEADER, None);
    assert!(!result.success);
    assert!(result.errors.iter().any(|e| e.contains("CSV file contains no data rows")));
}

#[test]
fn scenario_missing_brand() {
    let text = format!("{}\nP1,,Audio,Speaker\nP2,Acme,Audio,Amp\nP3,Acme,Video,TV", HEADER);
    let result = ProductImporter::default().parse(&text, None);
    assert_eq!(result.data.len(), 2);
    assert!(result.errors.iter().any(|e| e.contains("Brand is required")));
    assert!(result.success);
}

#[test]
fn parsing_is_idempotent() {
    let text = format!(
        "{}\nP1,Acme,Audio,Speaker\nP1,Acme,Audio,Speaker\nP2,,Audio,Amp\nP3,Bolt,Video,TV",
        HEADER
    );
    let importer = ProductImporter::default();
    let first = importer.parse(&text, None);
    let second = importer.parse(&text, None);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.data).unwrap(),
        serde_json::to_string(&second.data).unwrap()
    );
}

#[test]
fn accepted_rows_keep_source_order() {
    let text = format!(
        "{}\nP1,A,C,N\n,,,\nP2,,C,N\nP3,B,C,N\nP4,B,C,N\nP3,B,C,N\nP5,C,C,N",
        HEADER
    );
    let result = ProductImporter::default().parse(&text, None);
    let rows: Vec<usize> = result.data.iter().map(|r| r.row_number).collect();
    assert_eq!(rows, vec![2, 5, 6, 8]);
    assert!(rows.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(result.skipped_rows, 1);
}

#[test]
fn price_cells_normalize() {
    assert_eq!(coerce_decimal("$99.99"), FieldValue::Decimal(99.99));
    assert_eq!(coerce_decimal("99.99"), FieldValue::Decimal(99.99));
    assert_eq!(coerce_decimal("1,234.56"), FieldValue::Decimal(1234.56));
    for blank in ["N/A", "TBD", ""] {
        assert_eq!(coerce_decimal(blank), FieldValue::Null);
    }
}

#[test]
fn synonym_headers_do_not_pass_the_mapping_gate() {
    let diagnosis = ProductImporter::default()
        .validate_column_mapping(&headers(&["SKU", "Manufacturer", "Type", "Name"]));
    assert!(!diagnosis.is_valid);
    for field in ["Product ID", "Brand", "Category", "Product Name"] {
        assert!(diagnosis.missing_required.iter().any(|m| m == field), "{} not missing", field);
    }
    assert!(diagnosis.suggested_mappings["Product ID"].contains(&"SKU".to_string()));
}

#[test]
fn unresolved_mapping_aborts_with_suggestions() {
    let result = ProductImporter::default().parse("SKU,Manufacturer,Type,Name\nP1,Acme,Audio,Speaker", None);
    assert!(!result.success);
    assert!(result.data.is_empty());
    assert!(result.errors[0].starts_with("Missing required columns:"));
    let suggestions = result.suggested_mappings.expect("suggestions");
    assert!(suggestions["Brand"].contains(&"Manufacturer".to_string()));
}

#[test]
fn manual_override_resolves_unrecognized_headers() {
    let overrides: ColumnOverride = [
        ("SKU", "Product ID"),
        ("Manufacturer", "Brand"),
        ("Type", "Category"),
        ("Name", "Product Name"),
    ]
    .into_iter()
    .map(|(h, f)| (h.to_string(), f.to_string()))
    .collect();
    let result = ProductImporter::default().parse("SKU,Manufacturer,Type,Name\nP1,Acme,Audio,Speaker", Some(&overrides));
    assert!(result.success, "{:?}", result.errors);
    assert_eq!(result.data[0].record.brand, "Acme");
}

#[test]
fn synonym_mode_resolves_common_alternatives() {
    let importer = ProductImporter::new(ImportOptions {
        mapping_mode: MappingMode::Synonyms,
        ..ImportOptions::default()
    });
    let result = importer.parse("SKU,Manufacturer,Type,Name\nP1,Acme,Audio,Speaker", None);
    assert!(result.success, "{:?}", result.errors);
    assert_eq!(result.data[0].record.category, "Audio");
}

#[test]
fn semicolon_files_with_quoted_headers() {
    let text = "\u{feff}\"Product ID\";'Brand';Category;Product Name;MSRP\nP1;Acme;Audio;Speaker;\"1.299,00\"\nP2;Acme;Audio;Amp;$450";
    let result = ProductImporter::default().parse(text, None);
    assert_eq!(result.headers, vec!["Product ID", "Brand", "Category", "Product Name", "MSRP"]);
    assert_eq!(result.data.len(), 2);
    assert_eq!(result.data[0].record.msrp, Some(1299.0));
    assert_eq!(result.data[1].record.msrp, Some(450.0));
}

#[test]
fn crlf_files_number_rows_by_source_line() {
    let crlf = "Product ID,Brand,Category,Product Name\r\nP1,A,C,N\r\nP2,,C,N\r\nP3,B,C,N\r\n";
    let lf = crlf.replace("\r\n", "\n");

    for text in [crlf, lf.as_str()] {
        let result = ProductImporter::default().parse(text, None);
        let rows: Vec<usize> = result.data.iter().map(|r| r.row_number).collect();
        assert_eq!(rows, vec![2, 4]);
        assert_eq!(result.errors, vec!["Row 3: Brand is required"]);
        assert_eq!(result.data[1].record.name, "N");
    }
}

#[test]
fn mostly_failing_import_is_unsuccessful() {
    let text = format!("{}\nP1,A,C,N\nP2,,C,N\nP3,,C,N", HEADER);
    let result = ProductImporter::default().parse(&text, None);
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.errors.len(), 2);
    assert!(!result.success);
}
