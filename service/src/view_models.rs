use api_client::DEFAULT_API_BASE_URL;
use api_client::models::{Customer, QuoteHeader};

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "QUOTE_ADMIN_API_URL";

/// One row of the quote list, flattened for display with the owning
/// customer's name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteListModel {
    pub quote_id: Option<i64>,
    pub quote_ref: String,
    pub customer_id: Option<i64>,
    pub customer_name: String,
    pub quote_date: String,
    pub total_quantity: f64,
    pub total_value: f64,
}

impl QuoteListModel {
    pub fn from_quote(quote: &QuoteHeader, customer_name: String) -> Self {
        Self {
            quote_id: quote.quote_id,
            quote_ref: quote.quote_ref.clone().unwrap_or_default(),
            customer_id: quote.customer_id,
            customer_name,
            quote_date: quote.quote_date.clone(),
            total_quantity: quote.total_quantity.unwrap_or(0.0),
            total_value: quote.total_value.unwrap_or(0.0),
        }
    }
}

/// One row of the customer list.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerListModel {
    pub customer_id: Option<i64>,
    pub name: String,
    pub city: String,
    pub country: String,
    pub contact_number: String,
    pub email_id: String,
}

impl From<&Customer> for CustomerListModel {
    fn from(customer: &Customer) -> Self {
        Self {
            customer_id: customer.customer_id,
            name: customer.name.clone(),
            city: customer.city.clone(),
            country: customer.country.clone(),
            contact_number: customer.contact_number.clone(),
            email_id: customer.email_id.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_var(std::env::var(API_URL_ENV).ok())
    }

    fn from_var(value: Option<String>) -> Self {
        match value {
            Some(url) if !url.trim().is_empty() => Self {
                api_base_url: url.trim().to_string(),
            },
            _ => Self::default(),
        }
    }
}
