use reqwest::Client;

use crate::{
    api_error::{ApiError, check_response},
    models::{QuoteDetail, QuoteHeader},
};

#[derive(Debug, Clone)]
pub struct QuoteApi {
    client: Client,
    base_url: String,
}

impl QuoteApi {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/quotes", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/api/quotes/{}", self.base_url, id)
    }

    fn by_ref_url(&self, quote_ref: &str) -> String {
        format!("{}/api/quotes/ref/{}", self.base_url, quote_ref)
    }

    fn by_customer_url(&self, customer_id: i64) -> String {
        format!("{}/api/quotes/customer/{}", self.base_url, customer_id)
    }

    fn detail_collection_url(&self) -> String {
        format!("{}/api/quotes/detail", self.base_url)
    }

    fn detail_item_url(&self, sl_no: i64) -> String {
        format!("{}/api/quotes/detail/{}", self.base_url, sl_no)
    }

    pub async fn get_quotes(&self) -> Result<Vec<QuoteHeader>, ApiError> {
        let response = self.client.get(self.collection_url()).send().await?;
        let quotes = check_response(response).await?.json().await?;
        Ok(quotes)
    }

    pub async fn get_quote(&self, id: i64) -> Result<QuoteHeader, ApiError> {
        let response = self.client.get(self.item_url(id)).send().await?;
        let quote = check_response(response).await?.json().await?;
        Ok(quote)
    }

    pub async fn get_quote_by_ref(&self, quote_ref: &str) -> Result<QuoteHeader, ApiError> {
        let response = self.client.get(self.by_ref_url(quote_ref)).send().await?;
        let quote = check_response(response).await?.json().await?;
        Ok(quote)
    }

    pub async fn get_quotes_by_customer(
        &self,
        customer_id: i64,
    ) -> Result<Vec<QuoteHeader>, ApiError> {
        let response = self
            .client
            .get(self.by_customer_url(customer_id))
            .send()
            .await?;
        let quotes = check_response(response).await?.json().await?;
        Ok(quotes)
    }

    pub async fn create_quote(&self, quote: &QuoteHeader) -> Result<QuoteHeader, ApiError> {
        tracing::debug!(customer_id = ?quote.customer_id, "creating quote");
        let response = self
            .client
            .post(self.collection_url())
            .json(quote)
            .send()
            .await?;
        let created = check_response(response).await?.json().await?;
        Ok(created)
    }

    pub async fn update_quote(&self, id: i64, quote: &QuoteHeader) -> Result<QuoteHeader, ApiError> {
        tracing::debug!(quote_id = id, "updating quote");
        let response = self
            .client
            .put(self.item_url(id))
            .json(quote)
            .send()
            .await?;
        let updated = check_response(response).await?.json().await?;
        Ok(updated)
    }

    pub async fn delete_quote(&self, id: i64) -> Result<(), ApiError> {
        tracing::debug!(quote_id = id, "deleting quote");
        let response = self.client.delete(self.item_url(id)).send().await?;
        check_response(response).await?;
        Ok(())
    }

    pub async fn add_quote_detail(&self, detail: &QuoteDetail) -> Result<QuoteDetail, ApiError> {
        tracing::debug!(quote_id = ?detail.quote_id, "adding quote detail");
        let response = self
            .client
            .post(self.detail_collection_url())
            .json(detail)
            .send()
            .await?;
        let created = check_response(response).await?.json().await?;
        Ok(created)
    }

    pub async fn update_quote_detail(
        &self,
        sl_no: i64,
        detail: &QuoteDetail,
    ) -> Result<QuoteDetail, ApiError> {
        tracing::debug!(sl_no, "updating quote detail");
        let response = self
            .client
            .put(self.detail_item_url(sl_no))
            .json(detail)
            .send()
            .await?;
        let updated = check_response(response).await?.json().await?;
        Ok(updated)
    }

    pub async fn delete_quote_detail(&self, sl_no: i64) -> Result<(), ApiError> {
        tracing::debug!(sl_no, "deleting quote detail");
        let response = self.client.delete(self.detail_item_url(sl_no)).send().await?;
        check_response(response).await?;
        Ok(())
    }
}
