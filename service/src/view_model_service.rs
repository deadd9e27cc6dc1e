//! Builds display-ready list models by joining quote and customer data,
//! and carries the quote-list actions that need user feedback.

use std::collections::HashMap;
use std::sync::Arc;

use crate::customer_store::CustomerStore;
use crate::error::Error;
use crate::feedback::{ConfirmationPrompt, DEFAULT_DURATION, Notification, NotificationSink};
use crate::quote_store::QuoteStore;
use crate::view_models::{CustomerListModel, QuoteListModel};

pub struct ViewModelService {
    customers: Arc<dyn CustomerStore>,
    quotes: Arc<dyn QuoteStore>,
    notifications: Arc<dyn NotificationSink>,
    confirmation: Arc<dyn ConfirmationPrompt>,
}

impl ViewModelService {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        quotes: Arc<dyn QuoteStore>,
        notifications: Arc<dyn NotificationSink>,
        confirmation: Arc<dyn ConfirmationPrompt>,
    ) -> Self {
        Self {
            customers,
            quotes,
            notifications,
            confirmation,
        }
    }

    /// Fetches quotes and customers together and resolves each quote's
    /// customer name. Either fetch failing fails the whole build.
    pub async fn quote_list_models(&self) -> Result<Vec<QuoteListModel>, Error> {
        let (quotes, customers) =
            futures::join!(self.quotes.get_quotes(), self.customers.get_customers());
        let quotes = quotes?;
        let customers = customers?;

        let names: HashMap<i64, String> = customers
            .iter()
            .filter_map(|c| c.customer_id.map(|id| (id, c.name.clone())))
            .collect();

        Ok(quotes
            .iter()
            .map(|quote| {
                let name = quote
                    .customer_id
                    .and_then(|id| names.get(&id).cloned())
                    .unwrap_or_else(|| "Unknown".to_string());
                QuoteListModel::from_quote(quote, name)
            })
            .collect())
    }

    /// Same as [`Self::quote_list_models`] but reports the failure instead
    /// of returning it.
    pub async fn load_quote_list(&self) -> Option<Vec<QuoteListModel>> {
        match self.quote_list_models().await {
            Ok(models) => Some(models),
            Err(error) => {
                tracing::error!(error = %error, "loading quote list failed");
                self.notifications.notify(Notification::info(
                    "Failed to load quotes. Check logs for details.",
                    DEFAULT_DURATION,
                ));
                None
            }
        }
    }

    pub async fn customer_list_models(&self) -> Result<Vec<CustomerListModel>, Error> {
        let customers = self.customers.get_customers().await?;
        Ok(customers.iter().map(CustomerListModel::from).collect())
    }

    /// Deletes one quote after confirmation. Returns true when the quote
    /// was deleted.
    pub async fn delete_quote(&self, quote: &QuoteListModel) -> bool {
        let Some(quote_id) = quote.quote_id else {
            self.notifications
                .notify(Notification::info("Invalid quote ID", DEFAULT_DURATION));
            return false;
        };

        let prompt = format!("Are you sure you want to delete Quote {}?", quote.quote_ref);
        if !self.confirmation.confirm(&prompt) {
            return false;
        }

        match self.quotes.delete_quote(quote_id).await {
            Ok(()) => {
                self.notifications.notify(Notification::info(
                    "Quote deleted successfully!",
                    DEFAULT_DURATION,
                ));
                true
            }
            Err(error) => {
                tracing::error!(quote_id, error = %error, "deleting quote failed");
                self.notifications.notify(Notification::info(
                    "Failed to delete quote. Check logs for details.",
                    DEFAULT_DURATION,
                ));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::models::{Customer, QuoteHeader};

    use crate::customer_store::mock::MockCustomerStore;
    use crate::feedback::mock::{MockConfirmationPrompt, MockNotificationSink};
    use crate::quote_store::mock::MockQuoteStore;

    fn customer(id: i64, name: &str) -> Customer {
        Customer {
            customer_id: Some(id),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn quote(id: i64, quote_ref: &str, customer_id: Option<i64>) -> QuoteHeader {
        QuoteHeader {
            quote_id: Some(id),
            quote_ref: Some(quote_ref.to_string()),
            customer_id,
            quote_date: "2024-05-01".to_string(),
            total_quantity: Some(2.0),
            total_value: Some(20.0),
            ..Default::default()
        }
    }

    fn setup(
        customers: Vec<Customer>,
        quotes: Vec<QuoteHeader>,
    ) -> (
        ViewModelService,
        MockQuoteStore,
        MockNotificationSink,
        MockConfirmationPrompt,
    ) {
        let customer_store = MockCustomerStore::with_customers(customers);
        let quote_store = MockQuoteStore::with_quotes(quotes);
        let sink = MockNotificationSink::new();
        let prompt = MockConfirmationPrompt::accepting();
        let service = ViewModelService::new(
            Arc::new(customer_store),
            Arc::new(quote_store.clone()),
            Arc::new(sink.clone()),
            Arc::new(prompt.clone()),
        );
        (service, quote_store, sink, prompt)
    }

    #[tokio::test]
    async fn quote_list_resolves_customer_names() {
        let (service, _, _, _) = setup(
            vec![customer(1, "Acme Corp"), customer(2, "Globex")],
            vec![
                quote(10, "QR0010", Some(2)),
                quote(11, "QR0011", Some(9)),
                quote(12, "QR0012", None),
            ],
        );

        let models = service.quote_list_models().await.unwrap();

        assert_eq!(models.len(), 3);
        assert_eq!(models[0].customer_name, "Globex");
        assert_eq!(models[1].customer_name, "Unknown");
        assert_eq!(models[2].customer_name, "Unknown");
    }

    #[tokio::test]
    async fn quote_list_fails_when_either_fetch_fails() {
        let (service, quote_store, sink, _) = setup(vec![customer(1, "Acme Corp")], vec![]);
        quote_store.fail_list_with(Error::NetworkError("connection refused".to_string()));

        assert!(service.quote_list_models().await.is_err());

        assert!(service.load_quote_list().await.is_none());
        assert_eq!(
            sink.last().unwrap().message,
            "Failed to load quotes. Check logs for details."
        );
    }

    #[tokio::test]
    async fn delete_quote_confirms_with_the_reference() {
        let (service, quote_store, sink, prompt) = setup(
            vec![customer(1, "Acme Corp")],
            vec![quote(10, "QR0010", Some(1))],
        );

        let models = service.quote_list_models().await.unwrap();
        assert!(service.delete_quote(&models[0]).await);

        assert_eq!(
            prompt.prompts(),
            vec!["Are you sure you want to delete Quote QR0010?"]
        );
        assert_eq!(quote_store.deleted_quote_ids(), vec![10]);
        assert_eq!(sink.last().unwrap().message, "Quote deleted successfully!");
    }

    #[tokio::test]
    async fn delete_quote_declined_leaves_the_quote_alone() {
        let (service, quote_store, sink, prompt) = setup(
            vec![customer(1, "Acme Corp")],
            vec![quote(10, "QR0010", Some(1))],
        );
        prompt.set_answer(false);

        let models = service.quote_list_models().await.unwrap();
        assert!(!service.delete_quote(&models[0]).await);

        assert!(quote_store.deleted_quote_ids().is_empty());
        assert_eq!(sink.count(), 0);
    }

    #[tokio::test]
    async fn delete_quote_without_an_id_is_rejected() {
        let (service, quote_store, sink, prompt) = setup(vec![], vec![]);

        let model = QuoteListModel {
            quote_id: None,
            quote_ref: String::new(),
            customer_id: None,
            customer_name: "Unknown".to_string(),
            quote_date: String::new(),
            total_quantity: 0.0,
            total_value: 0.0,
        };
        assert!(!service.delete_quote(&model).await);

        assert_eq!(prompt.prompt_count(), 0);
        assert!(quote_store.deleted_quote_ids().is_empty());
        assert_eq!(sink.last().unwrap().message, "Invalid quote ID");
    }

    #[tokio::test]
    async fn delete_quote_failure_points_at_the_logs() {
        let (service, quote_store, sink, _) = setup(
            vec![customer(1, "Acme Corp")],
            vec![quote(10, "QR0010", Some(1))],
        );
        quote_store.fail_delete_with(Error::NetworkError("connection refused".to_string()));

        let models = service.quote_list_models().await.unwrap();
        assert!(!service.delete_quote(&models[0]).await);

        assert_eq!(
            sink.last().unwrap().message,
            "Failed to delete quote. Check logs for details."
        );
    }
}
