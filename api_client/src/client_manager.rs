use reqwest::Client;

use crate::{customer_api::CustomerApi, quote_api::QuoteApi};

/// Owns the shared HTTP client and base URL and hands out the per-entity
/// API accessors.
#[derive(Debug, Clone)]
pub struct ApiClientManager {
    client: Client,
    base_url: String,
}

impl ApiClientManager {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    pub fn get_customer_api(&self) -> CustomerApi {
        CustomerApi::new(self.client.clone(), self.base_url.clone())
    }

    pub fn get_quote_api(&self) -> QuoteApi {
        QuoteApi::new(self.client.clone(), self.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped_from_base_url() {
        let manager = ApiClientManager::new("https://example.test/");
        assert_eq!(manager.base_url(), "https://example.test");

        let manager = ApiClientManager::new("https://example.test");
        assert_eq!(manager.base_url(), "https://example.test");
    }
}
