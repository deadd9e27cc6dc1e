use std::sync::OnceLock;

use api_client::models::Customer;
use regex::Regex;

use crate::error::Error;

/// Backend columns are VARCHAR(255); reject longer values client-side.
const MAX_FIELD_LENGTH: usize = 255;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

pub fn validate_customer(customer: &Customer) -> Result<(), Error> {
    if customer.name.trim().is_empty() {
        return Err(Error::InvalidInput("name is required".to_string()));
    }
    check_length("name", &customer.name)?;
    check_length("address1", &customer.address1)?;
    check_length("address2", &customer.address2)?;
    check_length("city", &customer.city)?;
    check_length("stateProvince", &customer.state_province)?;
    check_length("country", &customer.country)?;
    check_length("contactNumber", &customer.contact_number)?;
    check_length("emailId", &customer.email_id)?;
    check_length("webUrl", &customer.web_url)?;
    if !customer.email_id.is_empty() && !email_regex().is_match(&customer.email_id) {
        return Err(Error::InvalidInput(
            "emailId is not a valid email address".to_string(),
        ));
    }
    Ok(())
}

fn check_length(field: &str, value: &str) -> Result<(), Error> {
    if value.chars().count() > MAX_FIELD_LENGTH {
        return Err(Error::InvalidInput(format!(
            "{} exceeds {} characters",
            field, MAX_FIELD_LENGTH
        )));
    }
    Ok(())
}
