use std::collections::HashSet;
use crate::domain::{
    models::ImportedRow,
    records::{
        CustomerBreakdown, CustomerRecord, CustomerSummary, CustomerType, DataQuality,
        ProductRecord, ProductSummary,
    },
};

/// Integer-rounded share of `count` in `total`; zero when `total` is zero.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

/// Number of distinct non-blank values.
pub fn distinct_count<'a>(values: impl IntoIterator<Item = &'a str>) -> usize {
    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

pub fn summarize_products(rows: &[ImportedRow<ProductRecord>]) -> ProductSummary {
    let total = rows.len();
    let with_pricing = rows.iter().filter(|r| r.record.has_pricing()).count();
    let with_images = rows.iter().filter(|r| r.record.image_url.is_some()).count();
    let with_spec_sheets = rows.iter().filter(|r| r.record.spec_sheet_url.is_some()).count();

    ProductSummary {
        total_products: total,
        unique_brands: distinct_count(rows.iter().map(|r| r.record.brand.as_str())),
        unique_categories: distinct_count(rows.iter().map(|r| r.record.category.as_str())),
        with_pricing,
        with_images,
        with_spec_sheets,
        pricing_coverage: percentage(with_pricing, total),
        image_coverage: percentage(with_images, total),
        spec_sheet_coverage: percentage(with_spec_sheets, total),
    }
}

pub fn summarize_customers(rows: &[ImportedRow<CustomerRecord>]) -> CustomerSummary {
    let total = rows.len();
    let residential = rows
        .iter()
        .filter(|r| r.record.customer_type == CustomerType::Residential)
        .count();
    let with_email = rows.iter().filter(|r| r.record.email.is_some()).count();
    let with_phone = rows.iter().filter(|r| !r.record.phone.is_empty()).count();
    let with_address = rows
        .iter()
        .filter(|r| !r.record.billing_address.is_empty() || !r.record.service_address.is_empty())
        .count();

    CustomerSummary {
        total_customers: total,
        customer_breakdown: CustomerBreakdown {
            residential,
            commercial: total - residential,
        },
        data_quality: DataQuality {
            with_email,
            with_phone,
            with_address,
            email_coverage: percentage(with_email, total),
            phone_coverage: percentage(with_phone, total),
            address_coverage: percentage(with_address, total),
        },
    }
}
