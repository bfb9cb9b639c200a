use once_cell::sync::Lazy;
use regex::Regex;
use crate::domain::records::Address;

static STATE_ZIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<state>[A-Za-z][A-Za-z .]*?)\s+(?P<zip>\d{5}(?:-\d{4})?)$").expect("valid state/zip regex")
});
static STATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid state regex"));
static ZIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}(?:-\d{4})?$").expect("valid zip regex"));

/// Address fragments as read from one row.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddressParts<'a> {
    pub street: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip: &'a str,
    pub country: &'a str,
}

/// Builds a structured address.
///
/// When only the street column is filled and it holds comma separated
/// fragments, the fragments are split into street, city, state and zip.
pub fn build_address(parts: AddressParts<'_>) -> Address {
    let street = parts.street.trim();
    let only_street = parts.city.trim().is_empty()
        && parts.state.trim().is_empty()
        && parts.zip.trim().is_empty();

    let mut address = if only_street && street.contains(',') {
        parse_address_line(street)
    } else {
        Address {
            street: street.to_string(),
            city: parts.city.trim().to_string(),
            state: parts.state.trim().to_string(),
            zip: parts.zip.trim().to_string(),
            country: String::new(),
        }
    };
    if !parts.country.trim().is_empty() {
        address.country = parts.country.trim().to_string();
    }
    address
}

/// Splits `"12 Main St, Springfield, IL 62704[, Country]"` into parts.
pub fn parse_address_line(line: &str) -> Address {
    let mut parts: Vec<&str> = line.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
    let mut address = Address::default();
    if parts.len() < 2 {
        address.street = parts.join(", ");
        return address;
    }

    let len = parts.len();
    if len >= 3 && split_state_zip(parts[len - 1]).is_none() && split_state_zip(parts[len - 2]).is_some() {
        address.country = parts.pop().unwrap_or_default().to_string();
    }
    if let Some(last) = parts.last().copied() {
        if let Some((state, zip)) = split_state_zip(last) {
            address.state = state;
            address.zip = zip;
            parts.pop();
        }
    }
    if parts.len() >= 2 {
        address.city = parts.pop().unwrap_or_default().to_string();
    }
    address.street = parts.join(", ");
    address
}

fn split_state_zip(fragment: &str) -> Option<(String, String)> {
    if let Some(caps) = STATE_ZIP_RE.captures(fragment) {
        return Some((caps["state"].trim().to_string(), caps["zip"].to_string()));
    }
    if STATE_RE.is_match(fragment) {
        return Some((fragment.to_string(), String::new()));
    }
    if ZIP_RE.is_match(fragment) {
        return Some((String::new(), fragment.to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_full_address_line() {
        let a = parse_address_line("12 Main St, Springfield, IL 62704");
        assert_eq!(a.street, "12 Main St");
        assert_eq!(a.city, "Springfield");
        assert_eq!(a.state, "IL");
        assert_eq!(a.zip, "62704");
        assert_eq!(a.country, "");
    }

    #[test]
    fn keeps_unit_in_street_and_reads_country() {
        let a = parse_address_line("12 Main St, Apt 4, Austin, TX 78701-1234, USA");
        assert_eq!(a.street, "12 Main St, Apt 4");
        assert_eq!(a.city, "Austin");
        assert_eq!(a.state, "TX");
        assert_eq!(a.zip, "78701-1234");
        assert_eq!(a.country, "USA");
    }

    #[test]
    fn street_and_city_only() {
        let a = parse_address_line("12 Main St, Springfield");
        assert_eq!(a.street, "12 Main St");
        assert_eq!(a.city, "Springfield");
        assert!(a.state.is_empty());
    }

    #[test]
    fn explicit_columns_are_not_split() {
        let a = build_address(AddressParts {
            street: "12 Main St, Suite 5",
            city: "Reno",
            state: "NV",
            zip: "89501",
            country: "",
        });
        assert_eq!(a.street, "12 Main St, Suite 5");
        assert_eq!(a.city, "Reno");
    }

    #[test]
    fn explicit_country_overrides_parsed_one() {
        let a = build_address(AddressParts {
            street: "1 Elm Rd, Dover, DE 19901",
            country: "United States",
            ..Default::default()
        });
        assert_eq!(a.city, "Dover");
        assert_eq!(a.country, "United States");
        assert!(build_address(AddressParts::default()).is_empty());
    }
}
