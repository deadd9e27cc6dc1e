use reqwest::Client;

use crate::{
    api_error::{ApiError, check_response},
    models::Customer,
};

#[derive(Debug, Clone)]
pub struct CustomerApi {
    client: Client,
    base_url: String,
}

impl CustomerApi {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/customers", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/api/customers/{}", self.base_url, id)
    }

    pub async fn get_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let response = self.client.get(self.collection_url()).send().await?;
        let customers = check_response(response).await?.json().await?;
        Ok(customers)
    }

    pub async fn get_customer(&self, id: i64) -> Result<Customer, ApiError> {
        let response = self.client.get(self.item_url(id)).send().await?;
        let customer = check_response(response).await?.json().await?;
        Ok(customer)
    }

    pub async fn create_customer(&self, customer: &Customer) -> Result<Customer, ApiError> {
        tracing::debug!(name = %customer.name, "creating customer");
        let response = self
            .client
            .post(self.collection_url())
            .json(customer)
            .send()
            .await?;
        let created = check_response(response).await?.json().await?;
        Ok(created)
    }

    pub async fn update_customer(&self, id: i64, customer: &Customer) -> Result<Customer, ApiError> {
        tracing::debug!(customer_id = id, "updating customer");
        let response = self
            .client
            .put(self.item_url(id))
            .json(customer)
            .send()
            .await?;
        let updated = check_response(response).await?.json().await?;
        Ok(updated)
    }

    pub async fn delete_customer(&self, id: i64) -> Result<(), ApiError> {
        tracing::debug!(customer_id = id, "deleting customer");
        let response = self.client.delete(self.item_url(id)).send().await?;
        check_response(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_follow_backend_layout() {
        let api = CustomerApi::new(Client::new(), "https://example.test".to_string());
        assert_eq!(api.collection_url(), "https://example.test/api/customers");
        assert_eq!(api.item_url(42), "https://example.test/api/customers/42");
    }
}
