use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product row ready for the batch insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub product_id: String,
    pub brand: String,
    pub category: String,
    pub name: String,
    pub product_number: String,
    pub description: String,
    pub dealer_price: Option<f64>,
    pub msrp: Option<f64>,
    pub map_price: Option<f64>,
    pub primary_distributor: String,
    pub secondary_distributor: String,
    pub tertiary_distributor: String,
    pub spec_sheet_url: Option<String>,
    pub image_url: Option<String>,
}

impl ProductRecord {
    pub fn has_pricing(&self) -> bool {
        self.dealer_price.is_some() || self.msrp.is_some() || self.map_price.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    Residential,
    Commercial,
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerType::Residential => write!(f, "residential"),
            CustomerType::Commercial => write!(f, "commercial"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.street.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
            && self.zip.is_empty()
            && self.country.is_empty()
    }
}

/// A customer row ready for the batch insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    pub company_name: String,
    pub customer_type: CustomerType,
    pub contact_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub role: String,
    pub billing_address: Address,
    pub service_address: Address,
    pub notes: String,
    pub tags: Vec<String>,
    pub date_added: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub total_products: usize,
    pub unique_brands: usize,
    pub unique_categories: usize,
    pub with_pricing: usize,
    pub with_images: usize,
    pub with_spec_sheets: usize,
    pub pricing_coverage: u32,
    pub image_coverage: u32,
    pub spec_sheet_coverage: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBreakdown {
    pub residential: usize,
    pub commercial: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    pub with_email: usize,
    pub with_phone: usize,
    pub with_address: usize,
    pub email_coverage: u32,
    pub phone_coverage: u32,
    pub address_coverage: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub total_customers: usize,
    pub customer_breakdown: CustomerBreakdown,
    pub data_quality: DataQuality,
}
