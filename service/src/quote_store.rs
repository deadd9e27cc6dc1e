//! Quote persistence abstraction, the quote-side sibling of
//! [`crate::customer_store`].

use std::sync::Arc;

use api_client::{
    client_manager::ApiClientManager,
    models::{QuoteDetail, QuoteHeader},
};
use async_trait::async_trait;

use crate::error::Error;

#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn get_quotes(&self) -> Result<Vec<QuoteHeader>, Error>;

    async fn get_quote(&self, id: i64) -> Result<QuoteHeader, Error>;

    /// Lookup by the backend-assigned reference; includes line items.
    async fn get_quote_by_ref(&self, quote_ref: &str) -> Result<QuoteHeader, Error>;

    async fn get_quotes_by_customer(&self, customer_id: i64) -> Result<Vec<QuoteHeader>, Error>;

    /// Creates the quote; the returned record carries the assigned id and
    /// reference.
    async fn create_quote(&self, quote: &QuoteHeader) -> Result<QuoteHeader, Error>;

    async fn update_quote(&self, id: i64, quote: &QuoteHeader) -> Result<QuoteHeader, Error>;

    async fn delete_quote(&self, id: i64) -> Result<(), Error>;

    /// Attaches a new line item to the quote named by `detail.quote_id`.
    async fn add_quote_detail(&self, detail: &QuoteDetail) -> Result<QuoteDetail, Error>;

    async fn update_quote_detail(
        &self,
        sl_no: i64,
        detail: &QuoteDetail,
    ) -> Result<QuoteDetail, Error>;

    async fn delete_quote_detail(&self, sl_no: i64) -> Result<(), Error>;
}

/// Production implementation backed by the remote REST API.
pub struct HttpQuoteStore {
    api: Arc<ApiClientManager>,
}

impl HttpQuoteStore {
    pub fn new(api: Arc<ApiClientManager>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl QuoteStore for HttpQuoteStore {
    async fn get_quotes(&self) -> Result<Vec<QuoteHeader>, Error> {
        let quotes = self.api.get_quote_api().get_quotes().await?;
        Ok(quotes)
    }

    async fn get_quote(&self, id: i64) -> Result<QuoteHeader, Error> {
        let quote = self.api.get_quote_api().get_quote(id).await?;
        Ok(quote)
    }

    async fn get_quote_by_ref(&self, quote_ref: &str) -> Result<QuoteHeader, Error> {
        let quote = self.api.get_quote_api().get_quote_by_ref(quote_ref).await?;
        Ok(quote)
    }

    async fn get_quotes_by_customer(&self, customer_id: i64) -> Result<Vec<QuoteHeader>, Error> {
        let quotes = self
            .api
            .get_quote_api()
            .get_quotes_by_customer(customer_id)
            .await?;
        Ok(quotes)
    }

    async fn create_quote(&self, quote: &QuoteHeader) -> Result<QuoteHeader, Error> {
        let created = self.api.get_quote_api().create_quote(quote).await?;
        tracing::info!(quote_ref = ?created.quote_ref, "quote created");
        Ok(created)
    }

    async fn update_quote(&self, id: i64, quote: &QuoteHeader) -> Result<QuoteHeader, Error> {
        let updated = self.api.get_quote_api().update_quote(id, quote).await?;
        Ok(updated)
    }

    async fn delete_quote(&self, id: i64) -> Result<(), Error> {
        self.api.get_quote_api().delete_quote(id).await?;
        tracing::info!(quote_id = id, "quote deleted");
        Ok(())
    }

    async fn add_quote_detail(&self, detail: &QuoteDetail) -> Result<QuoteDetail, Error> {
        let created = self.api.get_quote_api().add_quote_detail(detail).await?;
        Ok(created)
    }

    async fn update_quote_detail(
        &self,
        sl_no: i64,
        detail: &QuoteDetail,
    ) -> Result<QuoteDetail, Error> {
        let updated = self
            .api
            .get_quote_api()
            .update_quote_detail(sl_no, detail)
            .await?;
        Ok(updated)
    }

    async fn delete_quote_detail(&self, sl_no: i64) -> Result<(), Error> {
        self.api.get_quote_api().delete_quote_detail(sl_no).await?;
        Ok(())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockState {
        quotes: Vec<QuoteHeader>,
        next_sl_no: i64,
        deleted_quotes: Vec<i64>,
        deleted_details: Vec<i64>,
        fail_list: Option<Error>,
        fail_by_ref: Option<Error>,
        fail_by_customer: Option<Error>,
        fail_create: Option<Error>,
        fail_add_detail: Option<Error>,
        fail_update_detail: Option<Error>,
        fail_delete_detail: Option<Error>,
        fail_delete: Option<Error>,
    }

    /// In-memory implementation with failure injection per operation.
    #[derive(Clone, Default)]
    pub struct MockQuoteStore {
        state: Arc<Mutex<MockState>>,
    }

    impl MockQuoteStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_quotes(quotes: Vec<QuoteHeader>) -> Self {
            let store = Self::new();
            for quote in quotes {
                store.add_quote(quote);
            }
            store
        }

        pub fn add_quote(&self, quote: QuoteHeader) {
            let mut state = self.state.lock().unwrap();
            if let Some(details) = &quote.quote_details {
                let max_sl_no = details.iter().filter_map(|d| d.sl_no).max().unwrap_or(0);
                state.next_sl_no = state.next_sl_no.max(max_sl_no);
            }
            state.quotes.push(quote);
        }

        pub fn fail_list_with(&self, error: Error) {
            self.state.lock().unwrap().fail_list = Some(error);
        }

        pub fn fail_by_ref_with(&self, error: Error) {
            self.state.lock().unwrap().fail_by_ref = Some(error);
        }

        pub fn fail_by_customer_with(&self, error: Error) {
            self.state.lock().unwrap().fail_by_customer = Some(error);
        }

        pub fn fail_create_with(&self, error: Error) {
            self.state.lock().unwrap().fail_create = Some(error);
        }

        pub fn fail_add_detail_with(&self, error: Error) {
            self.state.lock().unwrap().fail_add_detail = Some(error);
        }

        pub fn fail_update_detail_with(&self, error: Error) {
            self.state.lock().unwrap().fail_update_detail = Some(error);
        }

        pub fn fail_delete_detail_with(&self, error: Error) {
            self.state.lock().unwrap().fail_delete_detail = Some(error);
        }

        pub fn fail_delete_with(&self, error: Error) {
            self.state.lock().unwrap().fail_delete = Some(error);
        }

        pub fn deleted_quote_ids(&self) -> Vec<i64> {
            self.state.lock().unwrap().deleted_quotes.clone()
        }

        pub fn deleted_detail_sl_nos(&self) -> Vec<i64> {
            self.state.lock().unwrap().deleted_details.clone()
        }
    }

    #[async_trait]
    impl QuoteStore for MockQuoteStore {
        async fn get_quotes(&self) -> Result<Vec<QuoteHeader>, Error> {
            let state = self.state.lock().unwrap();
            if let Some(error) = state.fail_list.clone() {
                return Err(error);
            }
            Ok(state.quotes.clone())
        }

        async fn get_quote(&self, id: i64) -> Result<QuoteHeader, Error> {
            self.state
                .lock()
                .unwrap()
                .quotes
                .iter()
                .find(|q| q.quote_id == Some(id))
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("quote {}", id)))
        }

        async fn get_quote_by_ref(&self, quote_ref: &str) -> Result<QuoteHeader, Error> {
            let state = self.state.lock().unwrap();
            if let Some(error) = state.fail_by_ref.clone() {
                return Err(error);
            }
            state
                .quotes
                .iter()
                .find(|q| q.quote_ref.as_deref() == Some(quote_ref))
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("quote {}", quote_ref)))
        }

        async fn get_quotes_by_customer(
            &self,
            customer_id: i64,
        ) -> Result<Vec<QuoteHeader>, Error> {
            let state = self.state.lock().unwrap();
            if let Some(error) = state.fail_by_customer.clone() {
                return Err(error);
            }
            Ok(state
                .quotes
                .iter()
                .filter(|q| q.customer_id == Some(customer_id))
                .cloned()
                .collect())
        }

        async fn create_quote(&self, quote: &QuoteHeader) -> Result<QuoteHeader, Error> {
            let mut state = self.state.lock().unwrap();
            if let Some(error) = state.fail_create.clone() {
                return Err(error);
            }
            let next_id = state
                .quotes
                .iter()
                .filter_map(|q| q.quote_id)
                .max()
                .unwrap_or(0)
                + 1;
            let mut created = quote.clone();
            created.quote_id = Some(next_id);
            created.quote_ref = Some(format!("QR{:04}", next_id));
            state.quotes.push(created.clone());
            Ok(created)
        }

        async fn update_quote(&self, id: i64, quote: &QuoteHeader) -> Result<QuoteHeader, Error> {
            let mut state = self.state.lock().unwrap();
            let slot = state
                .quotes
                .iter_mut()
                .find(|q| q.quote_id == Some(id))
                .ok_or_else(|| Error::NotFound(format!("quote {}", id)))?;
            *slot = quote.clone();
            slot.quote_id = Some(id);
            Ok(slot.clone())
        }

        async fn delete_quote(&self, id: i64) -> Result<(), Error> {
            let mut state = self.state.lock().unwrap();
            if let Some(error) = state.fail_delete.clone() {
                return Err(error);
            }
            state.quotes.retain(|q| q.quote_id != Some(id));
            state.deleted_quotes.push(id);
            Ok(())
        }

        async fn add_quote_detail(&self, detail: &QuoteDetail) -> Result<QuoteDetail, Error> {
            let mut state = self.state.lock().unwrap();
            if let Some(error) = state.fail_add_detail.clone() {
                return Err(error);
            }
            let quote_id = detail
                .quote_id
                .ok_or_else(|| Error::InvalidInput("quote detail needs a quote id".to_string()))?;
            state.next_sl_no += 1;
            let sl_no = state.next_sl_no;
            let quote = state
                .quotes
                .iter_mut()
                .find(|q| q.quote_id == Some(quote_id))
                .ok_or_else(|| Error::NotFound(format!("quote {}", quote_id)))?;
            let mut created = detail.clone();
            created.sl_no = Some(sl_no);
            created.quote_ref = quote.quote_ref.clone();
            quote
                .quote_details
                .get_or_insert_with(Vec::new)
                .push(created.clone());
            Ok(created)
        }

        async fn update_quote_detail(
            &self,
            sl_no: i64,
            detail: &QuoteDetail,
        ) -> Result<QuoteDetail, Error> {
            let mut state = self.state.lock().unwrap();
            if let Some(error) = state.fail_update_detail.clone() {
                return Err(error);
            }
            for quote in state.quotes.iter_mut() {
                if let Some(details) = quote.quote_details.as_mut() {
                    if let Some(slot) = details.iter_mut().find(|d| d.sl_no == Some(sl_no)) {
                        *slot = detail.clone();
                        slot.sl_no = Some(sl_no);
                        return Ok(slot.clone());
                    }
                }
            }
            Err(Error::NotFound(format!("quote detail {}", sl_no)))
        }

        async fn delete_quote_detail(&self, sl_no: i64) -> Result<(), Error> {
            let mut state = self.state.lock().unwrap();
            if let Some(error) = state.fail_delete_detail.clone() {
                return Err(error);
            }
            let state = &mut *state;
            for quote in state.quotes.iter_mut() {
                if let Some(details) = quote.quote_details.as_mut() {
                    let before = details.len();
                    details.retain(|d| d.sl_no != Some(sl_no));
                    if details.len() < before {
                        state.deleted_details.push(sl_no);
                        return Ok(());
                    }
                }
            }
            Err(Error::NotFound(format!("quote detail {}", sl_no)))
        }
    }
}
