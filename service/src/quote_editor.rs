//! Search-then-edit workflow for quote line items.
//!
//! A quote is located either by its reference or by customer name. The name
//! path can surface several quotes; the user picks one before editing. All
//! outcomes are reported through the notification sink, so the frontend only
//! renders state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_client::models::{QuoteDetail, QuoteHeader};

use crate::customer_store::CustomerStore;
use crate::feedback::{
    BRIEF_DURATION, ConfirmationPrompt, DEFAULT_DURATION, Notification, NotificationSink,
};
use crate::line_items;
use crate::quote_store::QuoteStore;

#[derive(Debug, Clone, PartialEq)]
pub enum QuoteSearch {
    ByReference(String),
    ByCustomerName(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A quote was loaded; its items are available via [`QuoteEditor::items`].
    Loaded,
    /// Several quotes match; pick one with [`QuoteEditor::select_quote`].
    Candidates(Vec<QuoteHeader>),
    NotFound,
    EmptyQuery,
}

#[derive(Default)]
struct EditorState {
    current_quote_id: Option<i64>,
    current_quote_ref: Option<String>,
    items: Vec<QuoteDetail>,
    candidates: Vec<QuoteHeader>,
}

pub struct QuoteEditor {
    quotes: Arc<dyn QuoteStore>,
    customers: Arc<dyn CustomerStore>,
    notifications: Arc<dyn NotificationSink>,
    confirmation: Arc<dyn ConfirmationPrompt>,
    state: Mutex<EditorState>,
}

impl QuoteEditor {
    pub fn new(
        quotes: Arc<dyn QuoteStore>,
        customers: Arc<dyn CustomerStore>,
        notifications: Arc<dyn NotificationSink>,
        confirmation: Arc<dyn ConfirmationPrompt>,
    ) -> Self {
        Self {
            quotes,
            customers,
            notifications,
            confirmation,
            state: Mutex::new(EditorState::default()),
        }
    }

    pub async fn search(&self, search: QuoteSearch) -> SearchOutcome {
        let value = match &search {
            QuoteSearch::ByReference(value) | QuoteSearch::ByCustomerName(value) => value.trim(),
        };
        if value.is_empty() {
            self.notify("Please enter a search value", DEFAULT_DURATION);
            return SearchOutcome::EmptyQuery;
        }
        match &search {
            QuoteSearch::ByReference(_) => self.search_by_reference(value).await,
            QuoteSearch::ByCustomerName(_) => self.search_by_customer_name(value).await,
        }
    }

    async fn search_by_reference(&self, value: &str) -> SearchOutcome {
        match self.quotes.get_quote_by_ref(value).await {
            Ok(quote) => {
                let details = quote.quote_details.clone().unwrap_or_default();
                if details.is_empty() {
                    self.clear_loaded();
                    self.notify("No quote found for this reference", DEFAULT_DURATION);
                    return SearchOutcome::NotFound;
                }
                {
                    let mut state = self.state.lock().unwrap();
                    state.current_quote_id = quote.quote_id;
                    state.current_quote_ref = quote.quote_ref.clone();
                    state.items = details;
                    state.candidates.clear();
                }
                self.notify("Quote loaded successfully", BRIEF_DURATION);
                SearchOutcome::Loaded
            }
            Err(error) => {
                tracing::debug!(quote_ref = value, error = %error, "quote lookup failed");
                self.clear_loaded();
                self.notify("Quote not found", DEFAULT_DURATION);
                SearchOutcome::NotFound
            }
        }
    }

    async fn search_by_customer_name(&self, value: &str) -> SearchOutcome {
        let customers = match self.customers.get_customers().await {
            Ok(customers) => customers,
            Err(error) => {
                tracing::error!(error = %error, "customer search failed");
                self.clear_all();
                self.notify("Error searching customers", DEFAULT_DURATION);
                return SearchOutcome::NotFound;
            }
        };

        let needle = value.to_lowercase();
        let matching = customers
            .iter()
            .find(|c| c.name.to_lowercase().contains(&needle))
            .and_then(|c| c.customer_id);
        let Some(customer_id) = matching else {
            self.clear_all();
            self.notify("No customer found with that name", DEFAULT_DURATION);
            return SearchOutcome::NotFound;
        };

        match self.quotes.get_quotes_by_customer(customer_id).await {
            Ok(quotes) if quotes.is_empty() => {
                self.clear_all();
                self.notify("No quotes found for this customer", DEFAULT_DURATION);
                SearchOutcome::NotFound
            }
            Ok(quotes) => {
                {
                    let mut state = self.state.lock().unwrap();
                    state.current_quote_id = None;
                    state.current_quote_ref = None;
                    state.items.clear();
                    state.candidates = quotes.clone();
                }
                self.notify(
                    format!("Found {} quote(s). Select one to edit.", quotes.len()),
                    DEFAULT_DURATION,
                );
                SearchOutcome::Candidates(quotes)
            }
            Err(error) => {
                tracing::error!(customer_id, error = %error, "quote fetch failed");
                self.clear_all();
                self.notify("Error fetching quotes", DEFAULT_DURATION);
                SearchOutcome::NotFound
            }
        }
    }

    /// Loads one of the candidate quotes (or any quote by reference).
    pub async fn select_quote(&self, quote_ref: &str) -> bool {
        match self.quotes.get_quote_by_ref(quote_ref).await {
            Ok(quote) => {
                {
                    let mut state = self.state.lock().unwrap();
                    state.current_quote_id = quote.quote_id;
                    state.current_quote_ref = quote.quote_ref.clone();
                    state.items = quote.quote_details.unwrap_or_default();
                }
                self.notify("Quote loaded successfully", BRIEF_DURATION);
                true
            }
            Err(error) => {
                tracing::error!(quote_ref, error = %error, "loading quote details failed");
                self.notify("Error loading quote details", DEFAULT_DURATION);
                false
            }
        }
    }

    /// Appends a fresh line item (empty description, rate 0, quantity 1) to
    /// the loaded quote.
    pub async fn add_item(&self) -> Option<QuoteDetail> {
        let Some(quote_id) = self.current_quote_id() else {
            self.notify("Please load a quote first", DEFAULT_DURATION);
            return None;
        };

        let new_item = QuoteDetail {
            quote_id: Some(quote_id),
            item_desc: String::new(),
            item_unit_rate: 0.0,
            item_quantity: 1.0,
            item_value: 0.0,
            ..Default::default()
        };
        match self.quotes.add_quote_detail(&new_item).await {
            Ok(saved) => {
                self.state.lock().unwrap().items.push(saved.clone());
                self.notify("New item added successfully", BRIEF_DURATION);
                Some(saved)
            }
            Err(error) => {
                tracing::error!(quote_id, error = %error, "adding quote item failed");
                self.notify("Failed to add new item", DEFAULT_DURATION);
                None
            }
        }
    }

    /// Saves an edited row. The derived value is recomputed before the save;
    /// success is silent because every edit is saved as it is made.
    pub async fn update_item(&self, mut item: QuoteDetail) -> Option<QuoteDetail> {
        item.item_value = line_items::item_value(item.item_unit_rate, item.item_quantity);
        let Some(sl_no) = item.sl_no else {
            tracing::warn!("attempted to update a quote item without sl_no");
            self.notify("Failed to update item", DEFAULT_DURATION);
            return None;
        };

        match self.quotes.update_quote_detail(sl_no, &item).await {
            Ok(updated) => {
                let mut state = self.state.lock().unwrap();
                if let Some(slot) = state.items.iter_mut().find(|i| i.sl_no == Some(sl_no)) {
                    *slot = updated.clone();
                }
                Some(updated)
            }
            Err(error) => {
                tracing::error!(sl_no, error = %error, "updating quote item failed");
                self.notify("Failed to update item", DEFAULT_DURATION);
                None
            }
        }
    }

    /// Deletes a line item after confirmation. Declining is a silent no-op.
    pub async fn remove_item(&self, sl_no: i64) -> bool {
        if !self
            .confirmation
            .confirm("Are you sure you want to delete this item?")
        {
            return false;
        }

        match self.quotes.delete_quote_detail(sl_no).await {
            Ok(()) => {
                self.state
                    .lock()
                    .unwrap()
                    .items
                    .retain(|item| item.sl_no != Some(sl_no));
                self.notify("Item deleted successfully", BRIEF_DURATION);
                true
            }
            Err(error) => {
                tracing::error!(sl_no, error = %error, "deleting quote item failed");
                self.notify("Delete failed", DEFAULT_DURATION);
                false
            }
        }
    }

    pub fn items(&self) -> Vec<QuoteDetail> {
        self.state.lock().unwrap().items.clone()
    }

    pub fn candidates(&self) -> Vec<QuoteHeader> {
        self.state.lock().unwrap().candidates.clone()
    }

    pub fn current_quote_id(&self) -> Option<i64> {
        self.state.lock().unwrap().current_quote_id
    }

    pub fn current_quote_ref(&self) -> Option<String> {
        self.state.lock().unwrap().current_quote_ref.clone()
    }

    pub fn total_quantity(&self) -> f64 {
        line_items::total_quantity(&self.state.lock().unwrap().items)
    }

    pub fn total_value(&self) -> f64 {
        line_items::total_value(&self.state.lock().unwrap().items)
    }

    fn clear_loaded(&self) {
        let mut state = self.state.lock().unwrap();
        state.current_quote_id = None;
        state.current_quote_ref = None;
        state.items.clear();
    }

    fn clear_all(&self) {
        let mut state = self.state.lock().unwrap();
        state.current_quote_id = None;
        state.current_quote_ref = None;
        state.items.clear();
        state.candidates.clear();
    }

    fn notify(&self, message: impl Into<String>, duration: Duration) {
        self.notifications
            .notify(Notification::info(message, duration));
    }
}
