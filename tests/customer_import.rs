use catalog_import::application::import::CustomerImporter;
use catalog_import::domain::records::CustomerType;

#[test]
fn realistic_customer_list() {
    let text = "\
Company Name,Contact Name,Email,Phone,Address,City,State,Zip,Tags,Date Added
The Johnson Family,Mary Johnson,mary@example.com,555-0100,12 Oak St,Springfield,IL,62701,vip,2024-03-01
Acme Holdings LLC,Bob Stone,bob(at)acme,555-0101,\"500 Market St, Suite 2, Denver, CO 80202\",,,,\"av;retail\",03/15/2024
Smith Residence,,,,,,,,,soon
,,,,,,,,,
";
    let result = CustomerImporter::default().parse(text, None);

    assert!(result.success, "{:?}", result.errors);
    assert_eq!(result.data.len(), 3);
    assert_eq!(result.skipped_rows, 1);

    let johnson = &result.data[0].record;
    assert_eq!(johnson.customer_type, CustomerType::Residential);
    assert_eq!(johnson.email.as_deref(), Some("mary@example.com"));
    assert_eq!(johnson.billing_address.city, "Springfield");
    assert_eq!(johnson.date_added.map(|d| d.to_string()).as_deref(), Some("2024-03-01"));

    let acme = &result.data[1].record;
    assert_eq!(acme.customer_type, CustomerType::Commercial);
    assert_eq!(acme.email, None);
    assert_eq!(acme.billing_address.state, "CO");
    assert_eq!(acme.billing_address.zip, "80202");
    assert_eq!(acme.tags, vec!["av", "retail"]);

    let smith = &result.data[2].record;
    assert_eq!(smith.customer_type, CustomerType::Residential);
    assert_eq!(smith.date_added, None);

    assert!(result
        .warnings
        .iter()
        .any(|w| w.starts_with("Row 3: Invalid email format \"bob(at)acme\"")));
    assert!(result.warnings.iter().any(|w| w.starts_with("Row 4: Date Added \"soon\"")));

    let summary = &result.summary;
    assert_eq!(summary.total_customers, 3);
    assert_eq!(summary.customer_breakdown.residential, 2);
    assert_eq!(summary.customer_breakdown.commercial, 1);
    assert_eq!(summary.data_quality.with_email, 1);
    assert_eq!(summary.data_quality.email_coverage, 33);
    assert_eq!(summary.data_quality.address_coverage, 67);
}

#[test]
fn rows_without_any_name_are_rejected() {
    let importer = CustomerImporter::default();
    let headers: Vec<String> = ["Email", "Phone"].iter().map(|h| h.to_string()).collect();
    let diagnosis = importer.validate_column_mapping(&headers);
    assert!(diagnosis.is_valid);
    assert!(diagnosis.missing_required.is_empty());

    let result = importer.parse("Email,Phone\na@b.co,555", None);
    assert!(!result.success);
    assert!(result.data.is_empty());
    assert_eq!(result.errors, vec!["Row 2: Company Name or Contact Name is required"]);
}

#[test]
fn serialized_result_uses_camel_case_envelope() {
    let result = CustomerImporter::default().parse("Name\nAcme Corp", None);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["totalRows"], 1);
    assert_eq!(json["summary"]["customerBreakdown"]["commercial"], 1);
    assert_eq!(json["data"][0]["company_name"], "Acme Corp");
    assert_eq!(json["data"][0]["row_number"], 2);
    assert!(json.get("suggestedMappings").is_none());
}

#[test]
fn short_year_dates_keep_their_century() {
    let result = CustomerImporter::default().parse("Name,Date Added\nAcme,3/7/24\nBolt Inc,12/31/99", None);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    let dates: Vec<String> = result
        .data
        .iter()
        .filter_map(|r| r.record.date_added.map(|d| d.to_string()))
        .collect();
    assert_eq!(dates, vec!["2024-03-07", "1999-12-31"]);
}
