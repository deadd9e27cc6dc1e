//! Customer persistence abstraction.
//!
//! Services depend on the [`CustomerStore`] trait instead of the HTTP client
//! directly, so flows like bulk deletion can be tested without a backend.
//!
//! # Usage in Production
//!
//! ```rust,ignore
//! use service::customer_store::HttpCustomerStore;
//!
//! let store = HttpCustomerStore::new(api_manager);
//! let customers = store.get_customers().await?;
//! ```
//!
//! # Usage in Tests
//!
//! ```rust,ignore
//! use service::customer_store::mock::MockCustomerStore;
//!
//! let store = MockCustomerStore::new();
//! store.add_customer(customer(1, "Acme"));
//! store.fail_delete_with(1, Error::ForeignKeyConstraint("has quotes".into()));
//!
//! // Call your service methods...
//!
//! assert_eq!(store.delete_calls(), 1);
//! assert!(!store.was_deleted(1));
//! ```

use std::sync::Arc;

use api_client::{client_manager::ApiClientManager, models::Customer};
use async_trait::async_trait;

use crate::{error::Error, validation};

#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customers in backend order.
    async fn get_customers(&self) -> Result<Vec<Customer>, Error>;

    async fn get_customer(&self, id: i64) -> Result<Customer, Error>;

    /// Validates and creates; the returned record carries the assigned id.
    async fn create_customer(&self, customer: &Customer) -> Result<Customer, Error>;

    async fn update_customer(&self, id: i64, customer: &Customer) -> Result<Customer, Error>;

    /// Fails with [`Error::ForeignKeyConstraint`] when the customer still has
    /// dependent quotes.
    async fn delete_customer(&self, id: i64) -> Result<(), Error>;
}

/// Production implementation backed by the remote REST API.
pub struct HttpCustomerStore {
    api: Arc<ApiClientManager>,
}

impl HttpCustomerStore {
    pub fn new(api: Arc<ApiClientManager>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CustomerStore for HttpCustomerStore {
    async fn get_customers(&self) -> Result<Vec<Customer>, Error> {
        let customers = self.api.get_customer_api().get_customers().await?;
        Ok(customers)
    }

    async fn get_customer(&self, id: i64) -> Result<Customer, Error> {
        let customer = self.api.get_customer_api().get_customer(id).await?;
        Ok(customer)
    }

    async fn create_customer(&self, customer: &Customer) -> Result<Customer, Error> {
        validation::validate_customer(customer)?;
        let created = self
            .api
            .get_customer_api()
            .create_customer(customer)
            .await?;
        tracing::info!(customer_id = ?created.customer_id, "customer created");
        Ok(created)
    }

    async fn update_customer(&self, id: i64, customer: &Customer) -> Result<Customer, Error> {
        validation::validate_customer(customer)?;
        let updated = self
            .api
            .get_customer_api()
            .update_customer(id, customer)
            .await?;
        tracing::info!(customer_id = id, "customer updated");
        Ok(updated)
    }

    async fn delete_customer(&self, id: i64) -> Result<(), Error> {
        self.api.get_customer_api().delete_customer(id).await?;
        tracing::info!(customer_id = id, "customer deleted");
        Ok(())
    }
}
